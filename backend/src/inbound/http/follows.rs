//! Subscription toggles. Both routes redirect back to the author's profile.

use actix_web::{HttpRequest, HttpResponse, get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{redirect_to, require_login};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

fn profile_path(username: &str) -> String {
    format!("/{username}/")
}

/// Follow an author.
#[utoipa::path(
    get,
    path = "/{username}/follow/",
    params(("username" = String, Path, description = "Author to follow")),
    responses(
        (status = 302, description = "Redirect to the profile, or to login"),
        (status = 404, description = "Unknown author", body = crate::domain::Error)
    ),
    tags = ["follows"],
    operation_id = "profileFollow"
)]
#[get("/{username}/follow/")]
pub async fn profile_follow(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    username: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let viewer = session.viewer()?;
    if let Err(redirect) = require_login(&viewer, &req) {
        return Ok(redirect);
    }
    state.follows.follow(&viewer, &username).await?;
    Ok(redirect_to(&profile_path(&username)))
}

/// Stop following an author.
#[utoipa::path(
    get,
    path = "/{username}/unfollow/",
    params(("username" = String, Path, description = "Author to unfollow")),
    responses(
        (status = 302, description = "Redirect to the profile, or to login"),
        (status = 404, description = "Unknown author or not following", body = crate::domain::Error)
    ),
    tags = ["follows"],
    operation_id = "profileUnfollow"
)]
#[get("/{username}/unfollow/")]
pub async fn profile_unfollow(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    username: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let viewer = session.viewer()?;
    if let Err(redirect) = require_login(&viewer, &req) {
        return Ok(redirect);
    }
    state.follows.unfollow(&viewer, &username).await?;
    Ok(redirect_to(&profile_path(&username)))
}
