//! Port abstraction for post storage.
//!
//! Adapters return posts with their author and group resolved, ordered by
//! publication time descending with ties broken by descending id.
use async_trait::async_trait;

use crate::domain::{Error, FeedScope, Post, PostDraft, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

impl From<PostPersistenceError> for Error {
    fn from(value: PostPersistenceError) -> Self {
        match value {
            PostPersistenceError::Connection { message } => Error::service_unavailable(message),
            PostPersistenceError::Query { message } => Error::internal(message),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Count posts selected by `scope`.
    async fn count(&self, scope: &FeedScope) -> Result<u64, PostPersistenceError>;

    /// List up to `limit` posts selected by `scope`, skipping `offset`.
    async fn list(
        &self,
        scope: &FeedScope,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, PostPersistenceError>;

    /// Fetch one post.
    async fn find(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError>;

    /// Store a new post; the store assigns the id and publication time.
    async fn create(&self, author: &UserId, draft: &PostDraft)
    -> Result<Post, PostPersistenceError>;

    /// Replace text, group and image of an existing post.
    ///
    /// Returns `None` when the post does not exist.
    async fn update(
        &self,
        id: PostId,
        draft: &PostDraft,
    ) -> Result<Option<Post>, PostPersistenceError>;
}
