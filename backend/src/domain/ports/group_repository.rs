//! Port abstraction for group storage.
use async_trait::async_trait;

use crate::domain::{Error, Group, GroupId, GroupSlug, NewGroup};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by group repository adapters.
    pub enum GroupPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "group repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "group repository query failed: {message}",
        /// A group with the same slug already exists.
        DuplicateSlug { slug: String } => "group slug already taken: {slug}",
    }
}

impl From<GroupPersistenceError> for Error {
    fn from(value: GroupPersistenceError) -> Self {
        match value {
            GroupPersistenceError::Connection { message } => Error::service_unavailable(message),
            GroupPersistenceError::Query { message } => Error::internal(message),
            err @ GroupPersistenceError::DuplicateSlug { .. } => Error::conflict(err.to_string()),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Fetch a group by slug.
    async fn find_by_slug(&self, slug: &GroupSlug) -> Result<Option<Group>, GroupPersistenceError>;

    /// Fetch a group by identifier.
    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, GroupPersistenceError>;

    /// All groups ordered by title.
    async fn list_all(&self) -> Result<Vec<Group>, GroupPersistenceError>;

    /// Store a new group.
    async fn create(&self, group: &NewGroup) -> Result<Group, GroupPersistenceError>;
}
