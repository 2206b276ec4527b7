//! Posts and the values used to create or edit them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::{Error, Group, GroupId, User};

/// Directory prefix every stored image path lives under.
pub const IMAGE_DIR: &str = "posts/";
/// Maximum stored image path length.
pub const IMAGE_PATH_MAX: usize = 100;

/// Database identifier of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Validation failures for post and comment submissions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    /// Text was missing or blank.
    #[error("text is required")]
    MissingText,
    /// The selected group does not exist.
    #[error("select a valid group")]
    InvalidGroup,
    /// The image path is not a relative path under `posts/`.
    #[error("image must be a relative path under posts/ of at most 100 characters")]
    InvalidImage,
}

impl PostValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::MissingText => "text",
            Self::InvalidGroup => "group",
            Self::InvalidImage => "image",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::MissingText => "required",
            Self::InvalidGroup => "invalid_choice",
            Self::InvalidImage => "invalid",
        }
    }
}

impl From<PostValidationError> for Error {
    fn from(value: PostValidationError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

/// Non-blank body text, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostText(String);

impl PostText {
    /// Validate raw text.
    pub fn new(text: impl AsRef<str>) -> Result<Self, PostValidationError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PostValidationError::MissingText);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PostText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PostText> for String {
    fn from(value: PostText) -> Self {
        value.0
    }
}

impl TryFrom<String> for PostText {
    type Error = PostValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Relative path of an uploaded image, e.g. `posts/cat.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImagePath(String);

impl ImagePath {
    /// Validate a stored image reference.
    pub fn new(path: impl Into<String>) -> Result<Self, PostValidationError> {
        let path = path.into();
        let Some(name) = path.strip_prefix(IMAGE_DIR) else {
            return Err(PostValidationError::InvalidImage);
        };
        let traverses = name.split('/').any(|segment| segment.is_empty() || segment == "..");
        if traverses || path.len() > IMAGE_PATH_MAX || path.contains('\\') {
            return Err(PostValidationError::InvalidImage);
        }
        Ok(Self(path))
    }
}

impl AsRef<str> for ImagePath {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ImagePath> for String {
    fn from(value: ImagePath) -> Self {
        value.0
    }
}

impl TryFrom<String> for ImagePath {
    type Error = PostValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A published post together with its author and group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Database identifier.
    #[schema(value_type = i64, example = 42)]
    pub id: PostId,
    /// Body text.
    #[schema(value_type = String, example = "Hello, world")]
    pub text: PostText,
    /// Publication timestamp assigned by the store.
    pub pub_date: DateTime<Utc>,
    /// Owning user.
    pub author: User,
    /// Optional group affiliation.
    pub group: Option<Group>,
    /// Optional image reference.
    #[schema(value_type = Option<String>, example = "posts/cat.jpg")]
    pub image: Option<ImagePath>,
}

/// Raw create/edit form values as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostSubmission {
    /// Body text; `None` when the field was absent.
    pub text: Option<String>,
    /// Raw group select value; blank or absent means no group.
    pub group: Option<String>,
    /// Image path reference, if any.
    pub image: Option<String>,
}

/// Validated values for creating or editing a post.
///
/// Group existence is checked by the post service against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    text: PostText,
    group: Option<GroupId>,
    image: Option<ImagePath>,
}

impl PostDraft {
    /// Validate a submission's shape.
    ///
    /// # Examples
    /// ```
    /// use blog::domain::{PostDraft, PostSubmission};
    ///
    /// let draft = PostDraft::try_from_submission(PostSubmission {
    ///     text: Some("  hello ".into()),
    ///     ..PostSubmission::default()
    /// })
    /// .expect("valid draft");
    /// assert_eq!(draft.text().as_ref(), "hello");
    /// ```
    pub fn try_from_submission(submission: PostSubmission) -> Result<Self, PostValidationError> {
        let PostSubmission { text, group, image } = submission;
        let text = PostText::new(text.unwrap_or_default())?;
        let group = parse_group_choice(group.as_deref())?;
        let image = image
            .filter(|raw| !raw.trim().is_empty())
            .map(ImagePath::new)
            .transpose()?;
        Ok(Self { text, group, image })
    }

    /// Body text.
    pub fn text(&self) -> &PostText {
        &self.text
    }

    /// Selected group.
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// Image reference.
    pub fn image(&self) -> Option<&ImagePath> {
        self.image.as_ref()
    }

    /// Fall back to `current` when the submission carried no image.
    ///
    /// Edits that omit the image field leave the stored reference in place.
    #[must_use]
    pub fn or_keep_image(mut self, current: Option<ImagePath>) -> Self {
        if self.image.is_none() {
            self.image = current;
        }
        self
    }
}

fn parse_group_choice(raw: Option<&str>) -> Result<Option<GroupId>, PostValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(|id| Some(GroupId::new(id)))
            .map_err(|_| PostValidationError::InvalidGroup),
    }
}

/// Result of an edit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome<T> {
    /// The viewer is the author; the edit was applied or the form loaded.
    Authorised(T),
    /// The viewer is not the author named in the path; nothing changed.
    NotAuthor,
}
