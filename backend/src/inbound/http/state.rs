//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on domain ports,
//! so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FeedQuery, FollowCommand, LoginService, PageCache, PostCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential checks for the login endpoint.
    pub login: Arc<dyn LoginService>,
    /// Read-side feeds and post detail.
    pub feeds: Arc<dyn FeedQuery>,
    /// Post and comment mutations.
    pub posts: Arc<dyn PostCommand>,
    /// Subscription mutations.
    pub follows: Arc<dyn FollowCommand>,
    /// Rendered-body cache for the global feed.
    pub page_cache: Arc<dyn PageCache>,
}

impl HttpState {
    /// Bundle the ports served by the HTTP adapter.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use blog::domain::ports::{FixtureLoginService, NoOpPageCache};
    /// use blog::domain::{FeedService, FollowService, PostService};
    /// use blog::inbound::http::state::HttpState;
    /// use blog::outbound::memory::InMemoryBlogStore;
    ///
    /// let store = Arc::new(InMemoryBlogStore::with_fixture_user());
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(FeedService::new(
    ///         store.clone(),
    ///         store.clone(),
    ///         store.clone(),
    ///         store.clone(),
    ///         store.clone(),
    ///     )),
    ///     Arc::new(PostService::new(
    ///         store.clone(),
    ///         store.clone(),
    ///         store.clone(),
    ///         store.clone(),
    ///     )),
    ///     Arc::new(FollowService::new(store.clone(), store)),
    ///     Arc::new(NoOpPageCache),
    /// );
    /// let _feeds = state.feeds.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        feeds: Arc<dyn FeedQuery>,
        posts: Arc<dyn PostCommand>,
        follows: Arc<dyn FollowCommand>,
        page_cache: Arc<dyn PageCache>,
    ) -> Self {
        Self {
            login,
            feeds,
            posts,
            follows,
            page_cache,
        }
    }
}
