//! Follow/unfollow use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::lookup::find_author;
use crate::domain::ports::{FollowCommand, FollowRepository, UserRepository};
use crate::domain::{Error, Viewer};

/// Follow service implementing [`FollowCommand`].
#[derive(Clone)]
pub struct FollowService {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl FollowService {
    /// Create a service over the given repositories.
    pub fn new(users: Arc<dyn UserRepository>, follows: Arc<dyn FollowRepository>) -> Self {
        Self { users, follows }
    }
}

#[async_trait]
impl FollowCommand for FollowService {
    async fn follow(&self, viewer: &Viewer, username: &str) -> Result<(), Error> {
        let follower = viewer.require()?;
        let author = find_author(self.users.as_ref(), username).await?;
        if author.id() == follower {
            return Ok(());
        }
        let created = self.follows.insert_if_absent(follower, author.id()).await?;
        debug!(%follower, author = %author.id(), created, "follow requested");
        Ok(())
    }

    async fn unfollow(&self, viewer: &Viewer, username: &str) -> Result<(), Error> {
        let follower = viewer.require()?;
        let author = find_author(self.users.as_ref(), username).await?;
        if self.follows.delete(follower, author.id()).await? {
            Ok(())
        } else {
            Err(Error::not_found(format!("not following {username}")))
        }
    }
}
