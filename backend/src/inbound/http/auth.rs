//! Login gate for pages that need an authenticated viewer.
//!
//! Anonymous requests to those pages are redirected to the login endpoint
//! with the original path in `next`, rather than receiving a 401 payload.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use url::form_urlencoded;

use crate::domain::{UserId, Viewer};

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/auth/login/";

/// Redirect to the login page, returning to `next` afterwards.
///
/// # Examples
/// ```
/// use blog::inbound::http::auth::login_redirect;
///
/// let response = login_redirect("/new/");
/// let location = response.headers().get("location").expect("location");
/// assert_eq!(location, "/auth/login/?next=/new/");
/// ```
pub fn login_redirect(next: &str) -> HttpResponse {
    redirect_to(&login_path(next))
}

/// Login endpoint path carrying `next` as a query parameter.
pub(crate) fn login_path(next: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(next.as_bytes()).collect();
    // Path separators stay readable in the query.
    let encoded = encoded.replace("%2F", "/");
    format!("{LOGIN_PATH}?next={encoded}")
}

/// A `302 Found` redirect to `location`.
pub fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// The viewer's id, or a login redirect for the current path.
pub fn require_login<'a>(
    viewer: &'a Viewer,
    req: &HttpRequest,
) -> Result<&'a UserId, HttpResponse> {
    viewer.user_id().ok_or_else(|| login_redirect(req.path()))
}
