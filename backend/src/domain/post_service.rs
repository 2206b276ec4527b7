//! Write-side service for posts and comments.
//!
//! Editing is gated on the viewer being the author named in the URL. Any other
//! viewer gets [`EditOutcome::NotAuthor`] and nothing is touched, whatever the
//! submitted form holds. Validation runs before any write, so a rejected
//! submission never persists partially. An edit without an image keeps the
//! stored one.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::lookup::{find_authored_post, find_author};
use crate::domain::ports::{
    CommentRepository, GroupRepository, PostCommand, PostRepository, UserRepository,
};
use crate::domain::{
    Comment, EditOutcome, Error, Post, PostDraft, PostId, PostSubmission, PostValidationError,
    User, UserId, Username, Viewer, comment_text,
};

/// Post service implementing [`PostCommand`].
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl PostService {
    /// Create a service over the given repositories.
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            posts,
            groups,
            users,
            comments,
        }
    }

    async fn validate(&self, submission: PostSubmission) -> Result<PostDraft, Error> {
        let draft = PostDraft::try_from_submission(submission)?;
        if let Some(group) = draft.group() {
            if self.groups.find_by_id(group).await?.is_none() {
                return Err(PostValidationError::InvalidGroup.into());
            }
        }
        Ok(draft)
    }

    /// Resolve the author named in the path if it is the viewer.
    async fn authorised_author(
        &self,
        viewer_id: &UserId,
        username: &str,
    ) -> Result<Option<User>, Error> {
        let Ok(username) = Username::new(username) else {
            return Ok(None);
        };
        let named = self.users.find_by_username(&username).await?;
        Ok(named.filter(|user| user.id() == viewer_id))
    }
}

#[async_trait]
impl PostCommand for PostService {
    async fn create_post(
        &self,
        viewer: &Viewer,
        submission: PostSubmission,
    ) -> Result<Post, Error> {
        let author = viewer.require()?;
        let draft = self.validate(submission).await?;
        let post = self.posts.create(author, &draft).await?;
        debug!(post_id = %post.id, author = %author, "post created");
        Ok(post)
    }

    async fn edit_form(
        &self,
        viewer: &Viewer,
        username: &str,
        post_id: PostId,
    ) -> Result<EditOutcome<Post>, Error> {
        let viewer_id = viewer.require()?;
        let Some(author) = self.authorised_author(viewer_id, username).await? else {
            return Ok(EditOutcome::NotAuthor);
        };
        let post = find_authored_post(self.posts.as_ref(), &author, post_id).await?;
        Ok(EditOutcome::Authorised(post))
    }

    async fn edit_post(
        &self,
        viewer: &Viewer,
        username: &str,
        post_id: PostId,
        submission: PostSubmission,
    ) -> Result<EditOutcome<Post>, Error> {
        let viewer_id = viewer.require()?;
        let Some(author) = self.authorised_author(viewer_id, username).await? else {
            return Ok(EditOutcome::NotAuthor);
        };
        let existing = find_authored_post(self.posts.as_ref(), &author, post_id).await?;
        let draft = self
            .validate(submission)
            .await?
            .or_keep_image(existing.image.clone());
        let updated = self
            .posts
            .update(existing.id, &draft)
            .await?
            .ok_or_else(|| Error::not_found(format!("post {post_id} not found")))?;
        debug!(post_id = %updated.id, "post edited");
        Ok(EditOutcome::Authorised(updated))
    }

    async fn add_comment(
        &self,
        viewer: &Viewer,
        username: &str,
        post_id: PostId,
        text: Option<String>,
    ) -> Result<Comment, Error> {
        let commenter = viewer.require()?;
        let author = find_author(self.users.as_ref(), username).await?;
        let post = find_authored_post(self.posts.as_ref(), &author, post_id).await?;
        let text = comment_text(text.as_deref())?;
        Ok(self.comments.create(post.id, commenter, &text).await?)
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
