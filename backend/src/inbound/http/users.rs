//! Login and logout handlers.
//!
//! ```text
//! GET  /auth/login/?next=/new/
//! POST /auth/login/?next=/new/   username=admin&password=password
//! POST /auth/logout/
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::LoginCredentials;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{LOGIN_PATH, login_path, redirect_to};
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::login_validation_error;

/// Form body for `POST /auth/login/`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginForm {
    /// Account name.
    #[serde(default)]
    pub username: String,
    /// Account password.
    #[serde(default)]
    pub password: String,
}

/// Query parameters accepted by the login endpoint.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoginQuery {
    /// Local path to return to after logging in.
    pub next: Option<String>,
}

/// Only same-site absolute paths are followed after login.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/",
    }
}

/// Descriptor for the login form returned by `GET /auth/login/`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginFormView {
    /// Where the form is submitted, keeping `next`.
    action: String,
    /// Form field names.
    #[schema(value_type = Vec<String>)]
    fields: [&'static str; 2],
    /// Path the viewer returns to once logged in.
    next: String,
}

impl LoginFormView {
    fn new(next: &str) -> Self {
        let action = if next == "/" {
            LOGIN_PATH.to_owned()
        } else {
            login_path(next)
        };
        Self {
            action,
            fields: ["username", "password"],
            next: next.to_owned(),
        }
    }
}

/// Login form; the target of every login redirect.
#[utoipa::path(
    get,
    path = "/auth/login/",
    params(LoginQuery),
    responses(
        (status = 200, description = "Login form descriptor", body = LoginFormView)
    ),
    tags = ["auth"],
    operation_id = "loginForm",
    security([])
)]
#[get("/auth/login/")]
pub async fn login_form(query: web::Query<LoginQuery>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(LoginFormView::new(safe_next(query.next.as_deref())))
}

/// Authenticate and establish a session, then redirect to `next`.
#[utoipa::path(
    post,
    path = "/auth/login/",
    params(LoginQuery),
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Logged in; redirect to `next`", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank username or password", body = crate::domain::Error),
        (status = 401, description = "Invalid credentials", body = crate::domain::Error),
        (status = 503, description = "Account store unavailable", body = crate::domain::Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<LoginQuery>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let LoginForm { username, password } = form.into_inner();
    let credentials = LoginCredentials::try_from_parts(&username, &password)
        .map_err(|err| login_validation_error(&err))?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    info!(%user_id, "user logged in");
    Ok(redirect_to(safe_next(query.next.as_deref())))
}

/// End the session and return to the index.
#[utoipa::path(
    post,
    path = "/auth/logout/",
    responses((status = 302, description = "Session cleared; redirect to the index")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout/")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    redirect_to("/")
}
