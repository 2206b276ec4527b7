//! OpenAPI schemas for feed payloads.
//!
//! [`pagination::Page`] is framework-agnostic and does not derive `ToSchema`,
//! so the feed responses that embed it are described here. Each wrapper
//! mirrors the JSON produced by the serialised domain type.

use utoipa::ToSchema;

use crate::domain::{Comment, Group, Post, User};

/// One page of posts.
#[derive(ToSchema)]
#[schema(as = PostPage, rename_all = "camelCase")]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct PostPageSchema {
    /// Posts on this page, newest first.
    items: Vec<Post>,
    /// 1-based number of this page after clamping.
    #[schema(example = 1)]
    number: u64,
    /// Total number of pages; at least one.
    #[schema(example = 2)]
    num_pages: u64,
    /// Total number of posts across all pages.
    #[schema(example = 13)]
    count: u64,
}

/// A group with one page of its posts.
#[derive(ToSchema)]
#[schema(as = GroupFeed)]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct GroupFeedSchema {
    group: Group,
    page: PostPageSchema,
}

/// An author's profile page.
#[derive(ToSchema)]
#[schema(as = AuthorFeed, rename_all = "camelCase")]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct AuthorFeedSchema {
    author: User,
    /// Total number of posts by the author.
    post_count: u64,
    /// Whether the viewer follows the author.
    following: bool,
    page: PostPageSchema,
}

/// Where and how to submit a comment.
#[derive(ToSchema)]
#[schema(as = CommentForm)]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct CommentFormSchema {
    /// Form target.
    #[schema(example = "/leo/3/comment")]
    action: String,
    /// Submitted field names.
    fields: Vec<String>,
}

/// A post with comments, as rendered by the detail page.
#[derive(ToSchema)]
#[schema(as = PostDetail, rename_all = "camelCase")]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct PostDetailSchema {
    post: Post,
    /// Comments, oldest first.
    comments: Vec<Comment>,
    /// Total number of posts by the post's author.
    post_count: u64,
    /// Whether the viewer follows the author.
    following: bool,
    /// Present for authenticated viewers only.
    comment_form: Option<CommentFormSchema>,
}
