//! Wiring of driven adapters into the HTTP handler state.
//!
//! With a database pool every port is backed by Diesel; without one the
//! server runs on an in-memory store seeded with the fixture account.

use std::sync::Arc;

use blog::domain::ports::{
    CommentRepository, FixtureLoginService, FollowRepository, GroupRepository, LoginService,
    PageCache, PostRepository, UserRepository,
};
use blog::domain::{FeedService, FollowService, PostService};
use blog::inbound::http::state::HttpState;
use blog::outbound::memory::InMemoryBlogStore;
use blog::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselFollowRepository, DieselGroupRepository,
    DieselLoginService, DieselPostRepository, DieselUserRepository,
};

/// Driven ports shared by the domain services.
struct Repositories {
    users: Arc<dyn UserRepository>,
    groups: Arc<dyn GroupRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl Repositories {
    fn diesel(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            groups: Arc::new(DieselGroupRepository::new(pool.clone())),
            posts: Arc::new(DieselPostRepository::new(pool.clone())),
            comments: Arc::new(DieselCommentRepository::new(pool.clone())),
            follows: Arc::new(DieselFollowRepository::new(pool.clone())),
        }
    }

    fn memory(store: InMemoryBlogStore) -> Self {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            groups: store.clone(),
            posts: store.clone(),
            comments: store.clone(),
            follows: store,
        }
    }

    fn into_state(self, login: Arc<dyn LoginService>, page_cache: Arc<dyn PageCache>) -> HttpState {
        let Self {
            users,
            groups,
            posts,
            comments,
            follows,
        } = self;
        let feeds = FeedService::new(
            posts.clone(),
            groups.clone(),
            users.clone(),
            follows.clone(),
            comments.clone(),
        );
        let authoring = PostService::new(posts, groups, users.clone(), comments);
        let subscriptions = FollowService::new(users, follows);
        HttpState::new(
            login,
            Arc::new(feeds),
            Arc::new(authoring),
            Arc::new(subscriptions),
            page_cache,
        )
    }
}

/// Build handler state from the optional pool and the selected page cache.
pub(crate) fn build_http_state(
    db_pool: Option<&DbPool>,
    page_cache: Arc<dyn PageCache>,
) -> HttpState {
    match db_pool {
        Some(pool) => {
            let login = DieselLoginService::new(DieselUserRepository::new(pool.clone()));
            Repositories::diesel(pool).into_state(Arc::new(login), page_cache)
        }
        None => Repositories::memory(InMemoryBlogStore::with_fixture_user())
            .into_state(Arc::new(FixtureLoginService), page_cache),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog::domain::ports::{FIXTURE_PASSWORD, FIXTURE_USERNAME, NoOpPageCache};
    use blog::domain::{LoginCredentials, PostSubmission, Viewer};
    use pagination::PageRequest;

    #[tokio::test]
    async fn memory_state_accepts_the_fixture_account_and_publishes() {
        let state = build_http_state(None, Arc::new(NoOpPageCache));
        let credentials = LoginCredentials::try_from_parts(FIXTURE_USERNAME, FIXTURE_PASSWORD)
            .expect("credentials");
        let user_id = state
            .login
            .authenticate(&credentials)
            .await
            .expect("fixture login");

        let viewer = Viewer::Authenticated(user_id);
        state
            .posts
            .create_post(
                &viewer,
                PostSubmission {
                    text: Some("hello".to_owned()),
                    ..PostSubmission::default()
                },
            )
            .await
            .expect("post created");
        let page = state
            .feeds
            .global_feed(PageRequest::from_query(None))
            .await
            .expect("feed");
        assert_eq!(page.count(), 1);
    }
}
