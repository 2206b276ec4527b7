//! Read-side pages: the global, group, followed and author feeds plus the
//! post detail page.
//!
//! ```text
//! GET /?page=2
//! GET /group/cats/
//! GET /follow/
//! GET /leo/
//! GET /leo/3/
//! ```
//!
//! The global feed body is served from the page cache when present. Bodies are
//! stored under the page number actually rendered, so the cache holds at most
//! one entry per existing page. Cache failures degrade to an uncached render.

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, get, web};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::PostDetail;
use crate::domain::ports::{PageCache, PageCacheKey};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_login;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::posts::detail_path;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_post_id;

/// `?page=` query accepted by every feed.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number; out-of-range or non-numeric values are clamped.
    pub page: Option<String>,
}

impl PageQuery {
    fn request(&self) -> PageRequest {
        PageRequest::from_query(self.page.as_deref())
    }
}

/// Comment form descriptor shown to authenticated viewers.
#[derive(Debug, Serialize)]
pub struct CommentForm {
    action: String,
    fields: [&'static str; 1],
}

/// Post detail payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailView {
    #[serde(flatten)]
    detail: PostDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment_form: Option<CommentForm>,
}

fn global_feed_key(request: PageRequest) -> PageCacheKey {
    let number = u64::try_from(request.number()).unwrap_or_default().max(1);
    PageCacheKey::global_feed(number)
}

async fn cached_body(cache: &dyn PageCache, key: &PageCacheKey) -> Option<Vec<u8>> {
    match cache.get(key).await {
        Ok(body) => body,
        Err(error) => {
            warn!(%key, %error, "page cache read failed; rendering uncached");
            None
        }
    }
}

async fn store_body(cache: &dyn PageCache, key: &PageCacheKey, body: &[u8]) {
    if let Err(error) = cache.put(key, body).await {
        warn!(%key, %error, "page cache write failed");
    }
}

fn json_body(body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body)
}

/// Global feed, newest first, served through the page cache.
#[utoipa::path(
    get,
    path = "/",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of all posts", body = crate::inbound::http::schemas::PostPageSchema),
        (status = 503, description = "Post store unavailable", body = crate::domain::Error)
    ),
    tags = ["feeds"],
    operation_id = "index",
    security([])
)]
#[get("/")]
pub async fn index(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let request = query.request();
    let key = global_feed_key(request);
    let cache = state.page_cache.as_ref();
    if let Some(body) = cached_body(cache, &key).await {
        return Ok(json_body(body));
    }

    let page = state.feeds.global_feed(request).await?;
    let body = serde_json::to_vec(&page)
        .map_err(|err| crate::domain::Error::internal(format!("serialise feed: {err}")))?;
    // Out-of-range requests render the last page; store it under that number.
    store_body(cache, &PageCacheKey::global_feed(page.number()), &body).await;
    Ok(json_body(body))
}

/// Posts in one group.
#[utoipa::path(
    get,
    path = "/group/{slug}/",
    params(("slug" = String, Path, description = "Group slug"), PageQuery),
    responses(
        (status = 200, description = "The group and a page of its posts", body = crate::inbound::http::schemas::GroupFeedSchema),
        (status = 404, description = "Unknown group", body = crate::domain::Error)
    ),
    tags = ["feeds"],
    operation_id = "groupPosts",
    security([])
)]
#[get("/group/{slug}/")]
pub async fn group_posts(
    state: web::Data<HttpState>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let feed = state.feeds.group_feed(&slug, query.request()).await?;
    Ok(HttpResponse::Ok().json(feed))
}

/// Posts by authors the viewer follows.
#[utoipa::path(
    get,
    path = "/follow/",
    params(PageQuery),
    responses(
        (status = 200, description = "A page of followed authors' posts", body = crate::inbound::http::schemas::PostPageSchema),
        (status = 302, description = "Not logged in; redirect to the login page")
    ),
    tags = ["feeds"],
    operation_id = "followIndex"
)]
#[get("/follow/")]
pub async fn follow_index(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let viewer = session.viewer()?;
    if let Err(redirect) = require_login(&viewer, &req) {
        return Ok(redirect);
    }
    let page = state.feeds.followed_feed(&viewer, query.request()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(page))
}

/// An author's profile with their posts.
#[utoipa::path(
    get,
    path = "/{username}/",
    params(("username" = String, Path, description = "Author username"), PageQuery),
    responses(
        (status = 200, description = "Profile and a page of posts", body = crate::inbound::http::schemas::AuthorFeedSchema),
        (status = 404, description = "Unknown author", body = crate::domain::Error)
    ),
    tags = ["feeds"],
    operation_id = "profile",
    security([])
)]
#[get("/{username}/")]
pub async fn profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let viewer = session.viewer()?;
    let feed = state
        .feeds
        .author_feed(&viewer, &username, query.request())
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(feed))
}

/// One post with its comments.
#[utoipa::path(
    get,
    path = "/{username}/{post_id}/",
    params(
        ("username" = String, Path, description = "Author username"),
        ("post_id" = i64, Path, description = "Post identifier")
    ),
    responses(
        (status = 200, description = "Post detail", body = crate::inbound::http::schemas::PostDetailSchema),
        (status = 404, description = "Unknown author or post", body = crate::domain::Error)
    ),
    tags = ["feeds"],
    operation_id = "postView",
    security([])
)]
#[get("/{username}/{post_id}/")]
pub async fn post_view(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (username, raw_id) = path.into_inner();
    let post_id = parse_post_id(&raw_id)?;
    let viewer = session.viewer()?;
    let detail = state.feeds.post_detail(&viewer, &username, post_id).await?;
    let comment_form = viewer.user_id().map(|_| CommentForm {
        action: format!(
            "{}comment",
            detail_path(detail.post.author.username().as_ref(), detail.post.id)
        ),
        fields: ["text"],
    });
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(PostDetailView {
            detail,
            comment_form,
        }))
}
