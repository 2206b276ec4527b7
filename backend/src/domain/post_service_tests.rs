//! Tests for the post service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::ports::{
    MockCommentRepository, MockGroupRepository, MockPostRepository, MockUserRepository,
};
use crate::domain::test_fixtures::{comment, group, post, user};
use crate::domain::{ErrorCode, GroupId, ImagePath};

struct Mocks {
    posts: MockPostRepository,
    groups: MockGroupRepository,
    users: MockUserRepository,
    comments: MockCommentRepository,
}

impl Mocks {
    fn new() -> Self {
        Self {
            posts: MockPostRepository::new(),
            groups: MockGroupRepository::new(),
            users: MockUserRepository::new(),
            comments: MockCommentRepository::new(),
        }
    }

    fn with_user(mut self, found: &User) -> Self {
        let found = found.clone();
        self.users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(found.clone())));
        self
    }

    fn into_service(self) -> PostService {
        PostService::new(
            Arc::new(self.posts),
            Arc::new(self.groups),
            Arc::new(self.users),
            Arc::new(self.comments),
        )
    }
}

fn submission(text: &str, group: Option<i64>) -> PostSubmission {
    PostSubmission {
        text: Some(text.to_owned()),
        group: group.map(|id| id.to_string()),
        image: None,
    }
}

#[rstest]
#[tokio::test]
async fn create_requires_authentication() {
    let mut mocks = Mocks::new();
    mocks.posts.expect_create().never();

    let err = mocks
        .into_service()
        .create_post(&Viewer::Anonymous, submission("hi", None))
        .await
        .expect_err("anonymous");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn create_rejects_blank_text_without_writing(#[case] text: &str) {
    let mut mocks = Mocks::new();
    mocks.posts.expect_create().never();

    let err = mocks
        .into_service()
        .create_post(
            &Viewer::Authenticated(UserId::random()),
            submission(text, None),
        )
        .await
        .expect_err("blank text");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&json!({"field": "text", "code": "required"}))
    );
}

#[rstest]
#[tokio::test]
async fn create_rejects_unknown_group() {
    let mut mocks = Mocks::new();
    mocks
        .groups
        .expect_find_by_id()
        .with(eq(GroupId::new(99)))
        .times(1)
        .return_once(|_| Ok(None));
    mocks.posts.expect_create().never();

    let err = mocks
        .into_service()
        .create_post(
            &Viewer::Authenticated(UserId::random()),
            submission("hello", Some(99)),
        )
        .await
        .expect_err("unknown group");
    assert_eq!(
        err.details(),
        Some(&json!({"field": "group", "code": "invalid_choice"}))
    );
}

#[rstest]
#[tokio::test]
async fn create_stores_post_for_viewer() {
    let author = user("leo");
    let mut mocks = Mocks::new();
    let cats = group(1, "cats");
    mocks
        .groups
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(cats)));
    let expected_author = author.id().clone();
    let stored = post(7, &author, "hello");
    mocks
        .posts
        .expect_create()
        .withf(move |id, draft| id == &expected_author && draft.text().as_ref() == "hello")
        .times(1)
        .return_once(move |_, _| Ok(stored));

    let created = mocks
        .into_service()
        .create_post(
            &Viewer::Authenticated(author.id().clone()),
            submission(" hello ", Some(1)),
        )
        .await
        .expect("created");
    assert_eq!(created.id, PostId::new(7));
}

#[rstest]
#[tokio::test]
async fn non_author_edit_is_redirected_without_writing() {
    let author = user("leo");
    let mut mocks = Mocks::new().with_user(&author);
    mocks.posts.expect_update().never();
    mocks.posts.expect_find().never();

    let outcome = mocks
        .into_service()
        .edit_post(
            &Viewer::Authenticated(UserId::random()),
            "leo",
            PostId::new(1),
            submission("changed", None),
        )
        .await
        .expect("outcome");
    assert_eq!(outcome, EditOutcome::NotAuthor);
}

#[rstest]
#[tokio::test]
async fn non_author_edit_ignores_malformed_group() {
    let author = user("leo");
    let mut mocks = Mocks::new().with_user(&author);
    mocks.groups.expect_find_by_id().never();
    mocks.posts.expect_update().never();

    let outcome = mocks
        .into_service()
        .edit_post(
            &Viewer::Authenticated(UserId::random()),
            "leo",
            PostId::new(1),
            PostSubmission {
                text: None,
                group: Some("cats".to_owned()),
                image: None,
            },
        )
        .await
        .expect("outcome");
    assert_eq!(outcome, EditOutcome::NotAuthor);
}

#[rstest]
#[tokio::test]
async fn author_edit_of_foreign_post_is_not_found() {
    let author = user("leo");
    let other = user("mia");
    let mut mocks = Mocks::new().with_user(&author);
    let foreign = post(3, &other, "not yours");
    mocks
        .posts
        .expect_find()
        .return_once(move |_| Ok(Some(foreign)));
    mocks.posts.expect_update().never();

    let err = mocks
        .into_service()
        .edit_form(
            &Viewer::Authenticated(author.id().clone()),
            "leo",
            PostId::new(3),
        )
        .await
        .expect_err("foreign post");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn author_edit_with_blank_text_leaves_post_unchanged() {
    let author = user("leo");
    let mut mocks = Mocks::new().with_user(&author);
    let existing = post(3, &author, "original");
    mocks
        .posts
        .expect_find()
        .return_once(move |_| Ok(Some(existing)));
    mocks.posts.expect_update().never();

    let err = mocks
        .into_service()
        .edit_post(
            &Viewer::Authenticated(author.id().clone()),
            "leo",
            PostId::new(3),
            submission(" ", None),
        )
        .await
        .expect_err("blank text");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn author_edit_updates_post() {
    let author = user("leo");
    let mut mocks = Mocks::new().with_user(&author);
    let existing = post(3, &author, "original");
    mocks
        .posts
        .expect_find()
        .return_once(move |_| Ok(Some(existing)));
    let updated = post(3, &author, "changed");
    let returned = updated.clone();
    mocks
        .posts
        .expect_update()
        .withf(|id, draft| *id == PostId::new(3) && draft.text().as_ref() == "changed")
        .times(1)
        .return_once(move |_, _| Ok(Some(returned)));

    let outcome = mocks
        .into_service()
        .edit_post(
            &Viewer::Authenticated(author.id().clone()),
            "leo",
            PostId::new(3),
            submission("changed", None),
        )
        .await
        .expect("edited");
    assert_eq!(outcome, EditOutcome::Authorised(updated));
}

#[rstest]
#[tokio::test]
async fn author_edit_without_image_keeps_stored_image() {
    let author = user("leo");
    let mut mocks = Mocks::new().with_user(&author);
    let mut existing = post(3, &author, "original");
    existing.image = Some(ImagePath::new("posts/cat.jpg").expect("path"));
    mocks
        .posts
        .expect_find()
        .return_once(move |_| Ok(Some(existing)));
    let updated = post(3, &author, "changed");
    mocks
        .posts
        .expect_update()
        .withf(|_, draft| draft.image().map(AsRef::as_ref) == Some("posts/cat.jpg"))
        .times(1)
        .return_once(move |_, _| Ok(Some(updated)));

    mocks
        .into_service()
        .edit_post(
            &Viewer::Authenticated(author.id().clone()),
            "leo",
            PostId::new(3),
            submission("changed", None),
        )
        .await
        .expect("edited");
}

#[rstest]
#[tokio::test]
async fn comment_is_attached_with_viewer_as_author() {
    let author = user("leo");
    let reader = user("mia");
    let mut mocks = Mocks::new().with_user(&author);
    let target = post(3, &author, "hello");
    let found = target.clone();
    mocks
        .posts
        .expect_find()
        .return_once(move |_| Ok(Some(found)));
    let reader_id = reader.id().clone();
    let stored = comment(1, &target, &reader, "nice");
    mocks
        .comments
        .expect_create()
        .withf(move |post_id, commenter, text| {
            *post_id == PostId::new(3) && commenter == &reader_id && text.as_ref() == "nice"
        })
        .times(1)
        .return_once(move |_, _, _| Ok(stored));

    let created = mocks
        .into_service()
        .add_comment(
            &Viewer::Authenticated(reader.id().clone()),
            "leo",
            PostId::new(3),
            Some("nice".to_owned()),
        )
        .await
        .expect("comment");
    assert_eq!(created.author, reader);
}

#[rstest]
#[case(None)]
#[case(Some("  "))]
#[tokio::test]
async fn comment_without_text_is_rejected(#[case] text: Option<&str>) {
    let author = user("leo");
    let mut mocks = Mocks::new().with_user(&author);
    let target = post(3, &author, "hello");
    mocks
        .posts
        .expect_find()
        .return_once(move |_| Ok(Some(target)));
    mocks.comments.expect_create().never();

    let err = mocks
        .into_service()
        .add_comment(
            &Viewer::Authenticated(UserId::random()),
            "leo",
            PostId::new(3),
            text.map(str::to_owned),
        )
        .await
        .expect_err("no text");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn comment_on_unknown_post_is_not_found() {
    let author = user("leo");
    let mut mocks = Mocks::new().with_user(&author);
    mocks.posts.expect_find().return_once(|_| Ok(None));

    let err = mocks
        .into_service()
        .add_comment(
            &Viewer::Authenticated(UserId::random()),
            "leo",
            PostId::new(404),
            Some("hi".to_owned()),
        )
        .await
        .expect_err("missing post");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
