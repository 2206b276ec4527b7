//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test as actix_test;

use crate::domain::ports::{
    FIXTURE_PASSWORD, FIXTURE_USERNAME, FixtureLoginService, NoOpPageCache, PageCache,
};
use crate::domain::{FeedService, FollowService, PostService};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::LoginForm;
use crate::outbound::memory::InMemoryBlogStore;

/// Session middleware with a fresh key and the `Secure` flag disabled.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state wired to real services over `store`.
pub fn store_state(store: &InMemoryBlogStore, page_cache: Arc<dyn PageCache>) -> HttpState {
    let shared = Arc::new(store.clone());
    HttpState::new(
        Arc::new(FixtureLoginService),
        Arc::new(FeedService::new(
            shared.clone(),
            shared.clone(),
            shared.clone(),
            shared.clone(),
            shared.clone(),
        )),
        Arc::new(PostService::new(
            shared.clone(),
            shared.clone(),
            shared.clone(),
            shared.clone(),
        )),
        Arc::new(FollowService::new(shared.clone(), shared)),
        page_cache,
    )
}

/// Handler state over a fresh store holding the fixture user, without caching.
pub fn fixture_state() -> (InMemoryBlogStore, HttpState) {
    let store = InMemoryBlogStore::with_fixture_user();
    let state = store_state(&store, Arc::new(NoOpPageCache));
    (store, state)
}

/// The session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// The `Location` header of a redirect.
pub fn location<B>(response: &ServiceResponse<B>) -> &str {
    response
        .headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect location")
}

/// Log the fixture account in through `/auth/login/` and return its cookie.
///
/// `app` must register [`crate::inbound::http::users::login`].
pub async fn log_in<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/auth/login/")
            .set_form(LoginForm {
                username: FIXTURE_USERNAME.to_owned(),
                password: FIXTURE_PASSWORD.to_owned(),
            })
            .to_request(),
    )
    .await;
    session_cookie(&response)
}
