//! Tests for the feed service.

use std::sync::Arc;

use mockall::predicate::eq;
use pagination::PageRequest;
use rstest::rstest;

use super::*;
use crate::domain::{ErrorCode, User};
use crate::domain::ports::{
    MockCommentRepository, MockFollowRepository, MockGroupRepository, MockPostRepository,
    MockUserRepository, PostPersistenceError,
};
use crate::domain::test_fixtures::{comment, group, post, user};

struct Mocks {
    posts: MockPostRepository,
    groups: MockGroupRepository,
    users: MockUserRepository,
    follows: MockFollowRepository,
    comments: MockCommentRepository,
}

impl Mocks {
    fn new() -> Self {
        Self {
            posts: MockPostRepository::new(),
            groups: MockGroupRepository::new(),
            users: MockUserRepository::new(),
            follows: MockFollowRepository::new(),
            comments: MockCommentRepository::new(),
        }
    }

    fn into_service(self) -> FeedService {
        FeedService::new(
            Arc::new(self.posts),
            Arc::new(self.groups),
            Arc::new(self.users),
            Arc::new(self.follows),
            Arc::new(self.comments),
        )
    }
}

fn numbered_posts(author: &User, ids: std::ops::RangeInclusive<i64>) -> Vec<Post> {
    ids.rev()
        .map(|id| post(id, author, &format!("post {id}")))
        .collect()
}

#[rstest]
#[case(1, 0, 10)]
#[case(2, 10, 10)]
#[case(7, 10, 10)]
#[case(-3, 0, 10)]
#[tokio::test]
async fn global_feed_fetches_the_clamped_window(
    #[case] requested: i64,
    #[case] offset: u64,
    #[case] limit: u64,
) {
    let author = user("leo");
    let mut mocks = Mocks::new();
    mocks.posts.expect_count().times(1).return_once(|_| Ok(13));
    let listed = numbered_posts(&author, 1..=3);
    mocks
        .posts
        .expect_list()
        .with(eq(FeedScope::All), eq(offset), eq(limit))
        .times(1)
        .return_once(move |_, _, _| Ok(listed));

    let page = mocks
        .into_service()
        .global_feed(PageRequest::new(requested))
        .await
        .expect("feed");
    assert_eq!(page.num_pages(), 2);
    assert_eq!(page.count(), 13);
}

#[rstest]
#[tokio::test]
async fn empty_feed_is_a_single_empty_page() {
    let mut mocks = Mocks::new();
    mocks.posts.expect_count().times(1).return_once(|_| Ok(0));
    mocks.posts.expect_list().never();

    let page = mocks
        .into_service()
        .global_feed(PageRequest::new(5))
        .await
        .expect("feed");
    assert_eq!(page.number(), 1);
    assert_eq!(page.num_pages(), 1);
    assert!(page.items().is_empty());
    assert!(!page.has_next());
}

#[rstest]
#[tokio::test]
async fn group_feed_scopes_posts_to_the_group() {
    let cats = group(3, "cats");
    let mut mocks = Mocks::new();
    let found = cats.clone();
    mocks
        .groups
        .expect_find_by_slug()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks
        .posts
        .expect_count()
        .with(eq(FeedScope::Group(cats.id())))
        .times(1)
        .return_once(|_| Ok(1));
    let author = user("leo");
    let listed = vec![post(1, &author, "meow")];
    mocks
        .posts
        .expect_list()
        .times(1)
        .return_once(move |_, _, _| Ok(listed));

    let feed = mocks
        .into_service()
        .group_feed("cats", PageRequest::FIRST)
        .await
        .expect("group feed");
    assert_eq!(feed.group, cats);
    assert_eq!(feed.page.items().len(), 1);
}

#[rstest]
#[case("dogs")]
#[case("not a slug")]
#[tokio::test]
async fn unknown_group_is_not_found(#[case] slug: &str) {
    let mut mocks = Mocks::new();
    mocks
        .groups
        .expect_find_by_slug()
        .returning(|_| Ok(None));

    let err = mocks
        .into_service()
        .group_feed(slug, PageRequest::FIRST)
        .await
        .expect_err("missing group");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(Viewer::Anonymous, false)]
#[case(Viewer::Authenticated(UserId::random()), true)]
#[tokio::test]
async fn author_feed_reports_count_and_follow_status(
    #[case] viewer: Viewer,
    #[case] following: bool,
) {
    let author = user("leo");
    let mut mocks = Mocks::new();
    let found = author.clone();
    mocks
        .users
        .expect_find_by_username()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks.posts.expect_count().times(1).return_once(|_| Ok(2));
    let listed = numbered_posts(&author, 1..=2);
    mocks
        .posts
        .expect_list()
        .times(1)
        .return_once(move |_, _, _| Ok(listed));
    mocks.follows.expect_exists().returning(|_, _| Ok(true));

    let feed = mocks
        .into_service()
        .author_feed(&viewer, "leo", PageRequest::FIRST)
        .await
        .expect("author feed");
    assert_eq!(feed.post_count, 2);
    assert_eq!(feed.following, following);
    assert_eq!(feed.author, author);
}

#[rstest]
#[tokio::test]
async fn unknown_author_is_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(None));

    let err = mocks
        .into_service()
        .author_feed(&Viewer::Anonymous, "ghost", PageRequest::FIRST)
        .await
        .expect_err("unknown author");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn followed_feed_requires_authentication() {
    let mut mocks = Mocks::new();
    mocks.posts.expect_count().never();

    let err = mocks
        .into_service()
        .followed_feed(&Viewer::Anonymous, PageRequest::FIRST)
        .await
        .expect_err("anonymous");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn followed_feed_is_scoped_to_the_viewer() {
    let reader = UserId::random();
    let mut mocks = Mocks::new();
    mocks
        .posts
        .expect_count()
        .with(eq(FeedScope::FollowedBy(reader.clone())))
        .times(1)
        .return_once(|_| Ok(0));

    let page = mocks
        .into_service()
        .followed_feed(&Viewer::Authenticated(reader), PageRequest::FIRST)
        .await
        .expect("followed feed");
    assert_eq!(page.count(), 0);
}

#[rstest]
#[tokio::test]
async fn post_detail_includes_comments_in_store_order() {
    let author = user("leo");
    let reader = user("mia");
    let target = post(5, &author, "hello");
    let comments = vec![
        comment(1, &target, &reader, "first"),
        comment(2, &target, &author, "second"),
    ];
    let mut mocks = Mocks::new();
    let found_author = author.clone();
    mocks
        .users
        .expect_find_by_username()
        .return_once(move |_| Ok(Some(found_author)));
    let found_post = target.clone();
    mocks
        .posts
        .expect_find()
        .with(eq(PostId::new(5)))
        .return_once(move |_| Ok(Some(found_post)));
    let listed = comments.clone();
    mocks
        .comments
        .expect_list_for_post()
        .return_once(move |_| Ok(listed));
    mocks.posts.expect_count().return_once(|_| Ok(4));

    let detail = mocks
        .into_service()
        .post_detail(&Viewer::Anonymous, "leo", PostId::new(5))
        .await
        .expect("detail");
    assert_eq!(detail.post, target);
    assert_eq!(detail.comments, comments);
    assert_eq!(detail.post_count, 4);
    assert!(!detail.following);
}

#[rstest]
#[tokio::test]
async fn post_detail_rejects_mismatched_author() {
    let author = user("leo");
    let other = user("mia");
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_find_by_username()
        .return_once(move |_| Ok(Some(other)));
    let found = post(5, &author, "hello");
    mocks
        .posts
        .expect_find()
        .return_once(move |_| Ok(Some(found)));

    let err = mocks
        .into_service()
        .post_detail(&Viewer::Anonymous, "mia", PostId::new(5))
        .await
        .expect_err("wrong author");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn repository_outage_is_service_unavailable() {
    let mut mocks = Mocks::new();
    mocks
        .posts
        .expect_count()
        .return_once(|_| Err(PostPersistenceError::connection("refused")));

    let err = mocks
        .into_service()
        .global_feed(PageRequest::FIRST)
        .await
        .expect_err("outage");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
