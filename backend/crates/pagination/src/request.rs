//! Client-supplied page numbers.

use std::fmt;
use std::str::FromStr;

/// Errors raised when strictly parsing a page number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageNumberError {
    /// The value is not a base-10 integer.
    #[error("page number must be an integer, got `{value}`")]
    NotAnInteger {
        /// Raw value supplied by the caller.
        value: String,
    },
}

/// A page number as requested by a client, before clamping.
///
/// The value may be zero, negative or past the last page; [`crate::Paginator`]
/// resolves it to a valid page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest(i64);

impl PageRequest {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Wrap a raw page number.
    #[must_use]
    pub const fn new(number: i64) -> Self {
        Self(number)
    }

    /// Parse an optional query-string value, selecting the first page when
    /// the value is missing or not an integer.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// assert_eq!(PageRequest::from_query(Some("3")).number(), 3);
    /// assert_eq!(PageRequest::from_query(Some("three")), PageRequest::FIRST);
    /// assert_eq!(PageRequest::from_query(None), PageRequest::FIRST);
    /// ```
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok())
            .unwrap_or(Self::FIRST)
    }

    /// The raw requested number.
    #[must_use]
    pub const fn number(self) -> i64 {
        self.0
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageRequest {
    type Err = PageNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| PageNumberError::NotAnInteger {
                value: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    //! Parsing coverage for client page numbers.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("1"), 1)]
    #[case(Some("7"), 7)]
    #[case(Some(" 2 "), 2)]
    #[case(Some("0"), 0)]
    #[case(Some("-4"), -4)]
    #[case(Some(""), 1)]
    #[case(Some("last"), 1)]
    #[case(Some("2.5"), 1)]
    #[case(None, 1)]
    fn from_query_is_lenient(#[case] raw: Option<&str>, #[case] expected: i64) {
        assert_eq!(PageRequest::from_query(raw).number(), expected);
    }

    #[rstest]
    fn strict_parse_reports_the_offending_value() {
        let err = "abc".parse::<PageRequest>().expect_err("not a number");
        assert_eq!(
            err,
            PageNumberError::NotAnInteger {
                value: "abc".to_owned()
            }
        );
        assert_eq!(err.to_string(), "page number must be an integer, got `abc`");
    }
}
