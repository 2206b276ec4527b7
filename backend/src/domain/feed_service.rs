//! Read-side service composing feeds, profiles and post detail views.
//!
//! Every feed is paginated with [`PAGE_SIZE`]: the service counts the scope,
//! clamps the requested page into range and fetches only that window.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest, Paginator};

use crate::domain::ports::{
    CommentRepository, FeedQuery, FollowRepository, GroupRepository, PostRepository,
    UserRepository,
};
use crate::domain::lookup::{find_authored_post, find_author};
use crate::domain::{
    AuthorFeed, Error, FeedScope, Group, GroupFeed, GroupSlug, PAGE_SIZE, Post, PostDetail, PostId,
    UserId, Viewer,
};

/// Feed service implementing [`FeedQuery`].
#[derive(Clone)]
pub struct FeedService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl FeedService {
    /// Create a service over the given repositories.
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
        follows: Arc<dyn FollowRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            posts,
            groups,
            users,
            follows,
            comments,
        }
    }

    async fn page(&self, scope: &FeedScope, request: PageRequest) -> Result<Page<Post>, Error> {
        let count = self.posts.count(scope).await?;
        let paginator = Paginator::new(PAGE_SIZE, count);
        let window = paginator.window(request);
        let items = if count == 0 {
            Vec::new()
        } else {
            self.posts
                .list(scope, window.offset(), window.limit())
                .await?
        };
        Ok(Page::new(items, window, &paginator))
    }

    async fn is_following(&self, viewer: &Viewer, author: &UserId) -> Result<bool, Error> {
        match viewer.user_id() {
            Some(follower) => Ok(self.follows.exists(follower, author).await?),
            None => Ok(false),
        }
    }
}

#[async_trait]
impl FeedQuery for FeedService {
    async fn global_feed(&self, page: PageRequest) -> Result<Page<Post>, Error> {
        self.page(&FeedScope::All, page).await
    }

    async fn group_feed(&self, slug: &str, page: PageRequest) -> Result<GroupFeed, Error> {
        let not_found = || Error::not_found(format!("group {slug} not found"));
        let slug = GroupSlug::new(slug).map_err(|_| not_found())?;
        let group = self
            .groups
            .find_by_slug(&slug)
            .await?
            .ok_or_else(not_found)?;
        let page = self.page(&FeedScope::Group(group.id()), page).await?;
        Ok(GroupFeed { group, page })
    }

    async fn author_feed(
        &self,
        viewer: &Viewer,
        username: &str,
        page: PageRequest,
    ) -> Result<AuthorFeed, Error> {
        let author = find_author(self.users.as_ref(), username).await?;
        let page = self
            .page(&FeedScope::Author(author.id().clone()), page)
            .await?;
        let following = self.is_following(viewer, author.id()).await?;
        Ok(AuthorFeed {
            post_count: page.count(),
            author,
            following,
            page,
        })
    }

    async fn followed_feed(&self, viewer: &Viewer, page: PageRequest) -> Result<Page<Post>, Error> {
        let follower = viewer.require()?.clone();
        self.page(&FeedScope::FollowedBy(follower), page).await
    }

    async fn post_detail(
        &self,
        viewer: &Viewer,
        username: &str,
        post_id: PostId,
    ) -> Result<PostDetail, Error> {
        let author = find_author(self.users.as_ref(), username).await?;
        let post = find_authored_post(self.posts.as_ref(), &author, post_id).await?;
        let comments = self.comments.list_for_post(post.id).await?;
        let post_count = self
            .posts
            .count(&FeedScope::Author(author.id().clone()))
            .await?;
        let following = self.is_following(viewer, author.id()).await?;
        Ok(PostDetail {
            post,
            comments,
            post_count,
            following,
        })
    }

    async fn groups(&self) -> Result<Vec<Group>, Error> {
        Ok(self.groups.list_all().await?)
    }
}

#[cfg(test)]
#[path = "feed_service_tests.rs"]
mod tests;
