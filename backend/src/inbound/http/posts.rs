//! Post authoring handlers: create, edit and comment.
//!
//! Every route here needs a logged-in viewer; anonymous requests are sent to
//! the login page with the current path as `next`. Successful writes redirect
//! to the post detail page.

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EditOutcome, Group, Post, PostId, PostSubmission};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{redirect_to, require_login};
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_post_id;

/// Form fields accepted by the create and edit endpoints.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct PostForm {
    /// Post body; required.
    pub text: Option<String>,
    /// Group id, or blank for none.
    pub group: Option<String>,
    /// Image path reference.
    pub image: Option<String>,
}

impl From<PostForm> for PostSubmission {
    fn from(form: PostForm) -> Self {
        Self {
            text: form.text,
            group: form.group,
            image: form.image,
        }
    }
}

/// Comment form fields.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CommentFormData {
    /// Comment body; required.
    pub text: Option<String>,
}

/// Descriptor for the create and edit forms.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostFormView {
    header: &'static str,
    button_label: &'static str,
    groups: Vec<Group>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post: Option<Post>,
}

/// Path of a post's detail page.
pub(crate) fn detail_path(username: &str, post_id: PostId) -> String {
    format!("/{username}/{post_id}/")
}

async fn form_view(state: &HttpState, post: Option<Post>) -> ApiResult<HttpResponse> {
    let (header, button_label) = if post.is_some() {
        ("Edit post", "Save")
    } else {
        ("New post", "Publish")
    };
    let groups = state.feeds.groups().await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(PostFormView {
            header,
            button_label,
            groups,
            post,
        }))
}

/// Blank create form.
#[utoipa::path(
    get,
    path = "/new/",
    responses(
        (status = 200, description = "Create form", body = PostFormView),
        (status = 302, description = "Not logged in")
    ),
    tags = ["posts"],
    operation_id = "newPostForm"
)]
#[get("/new/")]
pub async fn new_post_form(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let viewer = session.viewer()?;
    if let Err(redirect) = require_login(&viewer, &req) {
        return Ok(redirect);
    }
    form_view(&state, None).await
}

/// Publish a post as the viewer.
#[utoipa::path(
    post,
    path = "/new/",
    request_body(content = PostForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Created; redirect to the post, or to login"),
        (status = 400, description = "Invalid form", body = crate::domain::Error)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/new/")]
pub async fn create_post(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<PostForm>,
) -> ApiResult<HttpResponse> {
    let viewer = session.viewer()?;
    if let Err(redirect) = require_login(&viewer, &req) {
        return Ok(redirect);
    }
    let post = state
        .posts
        .create_post(&viewer, form.into_inner().into())
        .await?;
    Ok(redirect_to(&detail_path(
        post.author.username().as_ref(),
        post.id,
    )))
}

/// Edit form pre-filled with the post; non-authors go to the detail page.
#[utoipa::path(
    get,
    path = "/{username}/{post_id}/edit/",
    params(
        ("username" = String, Path, description = "Author username"),
        ("post_id" = i64, Path, description = "Post identifier")
    ),
    responses(
        (status = 200, description = "Edit form", body = PostFormView),
        (status = 302, description = "Not the author, or not logged in"),
        (status = 404, description = "Unknown post", body = crate::domain::Error)
    ),
    tags = ["posts"],
    operation_id = "editPostForm"
)]
#[get("/{username}/{post_id}/edit/")]
pub async fn edit_post_form(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let viewer = session.viewer()?;
    if let Err(redirect) = require_login(&viewer, &req) {
        return Ok(redirect);
    }
    let (username, raw_id) = path.into_inner();
    let post_id = parse_post_id(&raw_id)?;
    match state.posts.edit_form(&viewer, &username, post_id).await? {
        EditOutcome::Authorised(post) => form_view(&state, Some(post)).await,
        EditOutcome::NotAuthor => Ok(redirect_to(&detail_path(&username, post_id))),
    }
}

/// Apply an edit; non-authors are redirected without changes.
#[utoipa::path(
    post,
    path = "/{username}/{post_id}/edit/",
    params(
        ("username" = String, Path, description = "Author username"),
        ("post_id" = i64, Path, description = "Post identifier")
    ),
    request_body(content = PostForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirect to the post detail, or to login"),
        (status = 400, description = "Invalid form", body = crate::domain::Error),
        (status = 404, description = "Unknown post", body = crate::domain::Error)
    ),
    tags = ["posts"],
    operation_id = "editPost"
)]
#[post("/{username}/{post_id}/edit/")]
pub async fn edit_post(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
    form: web::Form<PostForm>,
) -> ApiResult<HttpResponse> {
    let viewer = session.viewer()?;
    if let Err(redirect) = require_login(&viewer, &req) {
        return Ok(redirect);
    }
    let (username, raw_id) = path.into_inner();
    let post_id = parse_post_id(&raw_id)?;
    // Both outcomes land on the detail page.
    state
        .posts
        .edit_post(&viewer, &username, post_id, form.into_inner().into())
        .await?;
    Ok(redirect_to(&detail_path(&username, post_id)))
}

/// Attach a comment to a post.
#[utoipa::path(
    post,
    path = "/{username}/{post_id}/comment",
    params(
        ("username" = String, Path, description = "Author username"),
        ("post_id" = i64, Path, description = "Post identifier")
    ),
    request_body(content = CommentFormData, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirect to the post detail, or to login"),
        (status = 400, description = "Missing text", body = crate::domain::Error),
        (status = 404, description = "Unknown post", body = crate::domain::Error)
    ),
    tags = ["posts"],
    operation_id = "addComment"
)]
#[post("/{username}/{post_id}/comment")]
pub async fn add_comment(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
    form: web::Form<CommentFormData>,
) -> ApiResult<HttpResponse> {
    let viewer = session.viewer()?;
    if let Err(redirect) = require_login(&viewer, &req) {
        return Ok(redirect);
    }
    let (username, raw_id) = path.into_inner();
    let post_id = parse_post_id(&raw_id)?;
    state
        .posts
        .add_comment(&viewer, &username, post_id, form.into_inner().text)
        .await?;
    Ok(redirect_to(&detail_path(&username, post_id)))
}
