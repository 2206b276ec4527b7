//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed blog model (users, groups, posts,
//! comments, follow edges) and the services implementing the driving ports.
//! Nothing here depends on the HTTP or persistence adapters.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - User, Group, Post, Comment: stored entities.
//! - FeedService, PostService, FollowService: driving port implementations.
//! - Viewer: the request context every operation receives.

pub mod auth;
pub mod comment;
pub mod error;
pub mod feed;
mod feed_service;
mod follow_service;
pub mod group;
mod lookup;
pub mod ports;
pub mod post;
mod post_service;
mod slug;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod trace_id;
pub mod user;
pub mod viewer;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::comment::{Comment, comment_text};
pub use self::error::{Error, ErrorCode};
pub use self::feed::{AuthorFeed, FeedScope, GroupFeed, PAGE_SIZE, PostDetail};
pub use self::feed_service::FeedService;
pub use self::follow_service::FollowService;
pub use self::group::{Group, GroupId, GroupSlug, GroupValidationError, NewGroup};
pub use self::post::{
    EditOutcome, ImagePath, Post, PostDraft, PostId, PostSubmission, PostText,
    PostValidationError,
};
pub use self::post_service::PostService;
pub use self::slug::SLUG_MAX;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserValidationError, Username};
pub use self::viewer::Viewer;
