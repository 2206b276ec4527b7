//! Cache-control policies for HTTP responses.

use actix_web::http::header::{CACHE_CONTROL, HeaderName};

/// Pages that depend on the session must always be revalidated.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Header tuple for responses rendered for a specific viewer.
pub const fn private_no_cache_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, PRIVATE_NO_CACHE_MUST_REVALIDATE)
}
