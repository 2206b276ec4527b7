//! Port abstraction for comment storage.
use async_trait::async_trait;

use crate::domain::{Comment, Error, PostId, PostText, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
    }
}

impl From<CommentPersistenceError> for Error {
    fn from(value: CommentPersistenceError) -> Self {
        match value {
            CommentPersistenceError::Connection { message } => Error::service_unavailable(message),
            CommentPersistenceError::Query { message } => Error::internal(message),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments on a post, oldest first with ties broken by ascending id.
    async fn list_for_post(&self, post: PostId) -> Result<Vec<Comment>, CommentPersistenceError>;

    /// Attach a comment; the store assigns the id and creation time.
    async fn create(
        &self,
        post: PostId,
        author: &UserId,
        text: &PostText,
    ) -> Result<Comment, CommentPersistenceError>;
}
