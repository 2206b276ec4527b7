//! Keys for cached page bodies.
use thiserror::Error;

/// Cache key identifying one rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageCacheKey(String);

impl PageCacheKey {
    /// Construct a cache key after validating that it is non-empty and trimmed.
    pub fn new(value: impl Into<String>) -> Result<Self, PageCacheKeyValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(PageCacheKeyValidationError::Empty);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(PageCacheKeyValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Key for one page of the global feed.
    ///
    /// # Examples
    /// ```
    /// use blog::domain::ports::PageCacheKey;
    ///
    /// assert_eq!(PageCacheKey::global_feed(2).as_str(), "index:page=2");
    /// ```
    pub fn global_feed(page_number: u64) -> Self {
        Self(format!("index:page={page_number}"))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for PageCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for PageCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`PageCacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageCacheKeyValidationError {
    /// Key is empty after trimming whitespace.
    #[error("page cache key must not be empty")]
    Empty,
    /// Key contains whitespace.
    #[error("page cache key must not contain whitespace")]
    ContainsWhitespace,
}

#[cfg(test)]
mod tests {
    use super::{PageCacheKey, PageCacheKeyValidationError};
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn cache_key_rejects_blank(#[case] value: &str) {
        let err = PageCacheKey::new(value).expect_err("blank keys rejected");
        assert_eq!(err, PageCacheKeyValidationError::Empty);
    }

    #[rstest]
    #[case(" leading")]
    #[case("inner space")]
    fn cache_key_rejects_whitespace(#[case] value: &str) {
        let err = PageCacheKey::new(value).expect_err("whitespace rejected");
        assert_eq!(err, PageCacheKeyValidationError::ContainsWhitespace);
    }

    #[rstest]
    fn global_feed_keys_differ_per_page() {
        assert_ne!(PageCacheKey::global_feed(1), PageCacheKey::global_feed(2));
        assert_eq!(
            PageCacheKey::new("index:page=1").expect("valid key"),
            PageCacheKey::global_feed(1)
        );
    }
}
