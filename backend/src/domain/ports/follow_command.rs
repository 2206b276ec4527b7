//! Driving port for subscribing to authors.

use async_trait::async_trait;

use crate::domain::{Error, Viewer};

/// Domain use-case port for follow edges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowCommand: Send + Sync {
    /// Follow `username`. Repeated calls and self-follows are no-ops.
    async fn follow(&self, viewer: &Viewer, username: &str) -> Result<(), Error>;

    /// Unfollow `username`; `not_found` when no edge exists.
    async fn unfollow(&self, viewer: &Viewer, username: &str) -> Result<(), Error>;
}
