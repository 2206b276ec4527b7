//! Groups: named categories a post may optionally belong to.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::slug::is_valid_slug;

/// Maximum group title length in characters.
pub const GROUP_TITLE_MAX: usize = 200;
/// Maximum group description length in characters.
pub const GROUP_DESCRIPTION_MAX: usize = 200;

/// Validation errors raised when building group values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupValidationError {
    /// The slug is empty, too long, or contains disallowed characters.
    #[error("slug must be 1-50 ASCII letters, digits, hyphens or underscores")]
    InvalidSlug,
    /// The title is blank.
    #[error("group title must not be empty")]
    EmptyTitle,
    /// The title exceeds [`GROUP_TITLE_MAX`] characters.
    #[error("group title must be at most {max} characters")]
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The description exceeds [`GROUP_DESCRIPTION_MAX`] characters.
    #[error("group description must be at most {max} characters")]
    DescriptionTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

/// Database identifier of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(i64);

impl GroupId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique URL-safe group identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupSlug(String);

impl GroupSlug {
    /// Validate and construct a slug.
    pub fn new(slug: impl Into<String>) -> Result<Self, GroupValidationError> {
        let slug = slug.into();
        if !is_valid_slug(&slug) {
            return Err(GroupValidationError::InvalidSlug);
        }
        Ok(Self(slug))
    }
}

impl AsRef<str> for GroupSlug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GroupSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<GroupSlug> for String {
    fn from(value: GroupSlug) -> Self {
        value.0
    }
}

impl TryFrom<String> for GroupSlug {
    type Error = GroupValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A stored group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[schema(value_type = i64, example = 1)]
    id: GroupId,
    #[schema(example = "Cats")]
    title: String,
    #[schema(value_type = String, example = "cats")]
    slug: GroupSlug,
    #[schema(example = "Everything about cats")]
    description: String,
}

impl Group {
    /// Assemble a group from stored values.
    pub fn new(id: GroupId, details: NewGroup) -> Self {
        let NewGroup {
            title,
            slug,
            description,
        } = details;
        Self {
            id,
            title,
            slug,
            description,
        }
    }

    /// Database identifier.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Unique slug used in group URLs.
    pub fn slug(&self) -> &GroupSlug {
        &self.slug
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Validated values for a group that has not been stored yet.
///
/// # Examples
/// ```
/// use blog::domain::NewGroup;
///
/// let group = NewGroup::try_new("cats", "Cats", "").expect("valid group");
/// assert_eq!(group.slug().as_ref(), "cats");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    title: String,
    slug: GroupSlug,
    description: String,
}

impl NewGroup {
    /// Validate raw group values.
    pub fn try_new(
        slug: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, GroupValidationError> {
        let slug = GroupSlug::new(slug)?;
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(GroupValidationError::EmptyTitle);
        }
        if title.chars().count() > GROUP_TITLE_MAX {
            return Err(GroupValidationError::TitleTooLong {
                max: GROUP_TITLE_MAX,
            });
        }
        let description = description.into().trim().to_owned();
        if description.chars().count() > GROUP_DESCRIPTION_MAX {
            return Err(GroupValidationError::DescriptionTooLong {
                max: GROUP_DESCRIPTION_MAX,
            });
        }
        Ok(Self {
            title,
            slug,
            description,
        })
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Unique slug.
    pub fn slug(&self) -> &GroupSlug {
        &self.slug
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("bad slug", "Title", "", GroupValidationError::InvalidSlug)]
    #[case("cats", "   ", "", GroupValidationError::EmptyTitle)]
    fn rejects_invalid_values(
        #[case] slug: &str,
        #[case] title: &str,
        #[case] description: &str,
        #[case] expected: GroupValidationError,
    ) {
        let err = NewGroup::try_new(slug, title, description).expect_err("invalid group");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn rejects_overlong_title_and_description() {
        let long = "x".repeat(GROUP_TITLE_MAX + 1);
        assert_eq!(
            NewGroup::try_new("cats", long.clone(), "").expect_err("title too long"),
            GroupValidationError::TitleTooLong {
                max: GROUP_TITLE_MAX
            }
        );
        assert_eq!(
            NewGroup::try_new("cats", "Cats", long).expect_err("description too long"),
            GroupValidationError::DescriptionTooLong {
                max: GROUP_DESCRIPTION_MAX
            }
        );
    }

    #[rstest]
    fn stored_group_keeps_validated_values() {
        let details = NewGroup::try_new("cats", " Cats ", "Purring").expect("valid");
        let group = Group::new(GroupId::new(7), details);
        assert_eq!(group.id().get(), 7);
        assert_eq!(group.title(), "Cats");
        assert_eq!(group.slug().as_ref(), "cats");
        assert_eq!(group.description(), "Purring");
    }
}
