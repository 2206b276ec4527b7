//! Driving port for creating and editing posts and adding comments.

use async_trait::async_trait;

use crate::domain::{Comment, EditOutcome, Error, Post, PostId, PostSubmission, Viewer};

/// Domain use-case port for post mutations.
///
/// Every operation fails with `unauthorized` for anonymous viewers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Publish a new post authored by the viewer.
    async fn create_post(&self, viewer: &Viewer, submission: PostSubmission)
    -> Result<Post, Error>;

    /// Load a post for editing when the viewer is the author named in the path.
    async fn edit_form(
        &self,
        viewer: &Viewer,
        username: &str,
        post_id: PostId,
    ) -> Result<EditOutcome<Post>, Error>;

    /// Apply an edit when the viewer is the author named in the path.
    async fn edit_post(
        &self,
        viewer: &Viewer,
        username: &str,
        post_id: PostId,
        submission: PostSubmission,
    ) -> Result<EditOutcome<Post>, Error>;

    /// Attach a comment written by the viewer.
    async fn add_comment(
        &self,
        viewer: &Viewer,
        username: &str,
        post_id: PostId,
        text: Option<String>,
    ) -> Result<Comment, Error>;
}
