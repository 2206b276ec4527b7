//! Port abstraction for the directed follow edges between users.
use async_trait::async_trait;

use crate::domain::{Error, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by follow repository adapters.
    pub enum FollowPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "follow repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "follow repository query failed: {message}",
    }
}

impl From<FollowPersistenceError> for Error {
    fn from(value: FollowPersistenceError) -> Self {
        match value {
            FollowPersistenceError::Connection { message } => Error::service_unavailable(message),
            FollowPersistenceError::Query { message } => Error::internal(message),
        }
    }
}

/// At most one edge exists per `(follower, author)` pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Whether `follower` follows `author`.
    async fn exists(&self, follower: &UserId, author: &UserId)
    -> Result<bool, FollowPersistenceError>;

    /// Create the edge unless it already exists. Returns `true` when created.
    async fn insert_if_absent(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, FollowPersistenceError>;

    /// Delete the edge. Returns `false` when no edge existed.
    async fn delete(&self, follower: &UserId, author: &UserId)
    -> Result<bool, FollowPersistenceError>;
}
