//! Driving port for the read side: feeds, profiles and post detail.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{AuthorFeed, Error, Group, GroupFeed, Post, PostDetail, PostId, Viewer};

/// Domain use-case port for paginated reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// Every post, newest first.
    async fn global_feed(&self, page: PageRequest) -> Result<Page<Post>, Error>;

    /// Posts in the group identified by `slug`; `not_found` for an unknown slug.
    async fn group_feed(&self, slug: &str, page: PageRequest) -> Result<GroupFeed, Error>;

    /// An author's posts with post count and the viewer's follow status.
    async fn author_feed(
        &self,
        viewer: &Viewer,
        username: &str,
        page: PageRequest,
    ) -> Result<AuthorFeed, Error>;

    /// Posts by authors the viewer follows; `unauthorized` for anonymous viewers.
    async fn followed_feed(&self, viewer: &Viewer, page: PageRequest) -> Result<Page<Post>, Error>;

    /// A post authored by `username` with its comments.
    async fn post_detail(
        &self,
        viewer: &Viewer,
        username: &str,
        post_id: PostId,
    ) -> Result<PostDetail, Error>;

    /// All groups ordered by title.
    async fn groups(&self) -> Result<Vec<Group>, Error>;
}
