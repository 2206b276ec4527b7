//! Feed scopes and the view models returned by read operations.
//!
//! Every feed is a [`Page`] of posts ordered newest first. The composite
//! views add the context the HTTP layer renders next to the posts: the group
//! for a group feed, the author's post count and follow status for profile
//! and detail pages.

use std::num::NonZeroU64;

use pagination::Page;
use serde::Serialize;

use super::{Comment, Group, GroupId, Post, User, UserId};

/// Number of posts on every feed page.
pub const PAGE_SIZE: NonZeroU64 = match NonZeroU64::new(10) {
    Some(size) => size,
    None => panic!("page size must be non-zero"),
};

/// Which posts a feed query selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    /// Every post.
    All,
    /// Posts in one group.
    Group(GroupId),
    /// Posts written by one user.
    Author(UserId),
    /// Posts by any author the given user follows.
    FollowedBy(UserId),
}

/// A group together with one page of its posts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupFeed {
    /// The group whose posts are listed.
    pub group: Group,
    /// Requested page of posts.
    pub page: Page<Post>,
}

/// An author's profile page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorFeed {
    /// Profile owner.
    pub author: User,
    /// Total number of posts by the author.
    pub post_count: u64,
    /// Whether the viewer follows the author.
    pub following: bool,
    /// Requested page of posts.
    pub page: Page<Post>,
}

/// A single post with its comments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    /// The post.
    pub post: Post,
    /// Comments, oldest first.
    pub comments: Vec<Comment>,
    /// Total number of posts by the post's author.
    pub post_count: u64,
    /// Whether the viewer follows the author.
    pub following: bool,
}
