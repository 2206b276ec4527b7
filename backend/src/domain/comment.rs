//! Comments attached to posts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{PostId, PostText, PostValidationError, User};

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Database identifier.
    pub id: i64,
    /// Parent post.
    #[schema(value_type = i64)]
    pub post_id: PostId,
    /// Comment author.
    pub author: User,
    /// Body text.
    #[schema(value_type = String)]
    pub text: PostText,
    /// Creation timestamp assigned by the store.
    pub created: DateTime<Utc>,
}

/// Validate comment text; blank text fails with the `text`/`required` error.
pub fn comment_text(raw: Option<&str>) -> Result<PostText, PostValidationError> {
    PostText::new(raw.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_text_requires_content() {
        assert_eq!(
            comment_text(None).expect_err("missing"),
            PostValidationError::MissingText
        );
        assert_eq!(
            comment_text(Some("  nice ")).expect("valid").as_ref(),
            "nice"
        );
    }
}
