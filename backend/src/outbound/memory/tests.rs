//! Behaviour of the in-memory content store.

use chrono::{Duration, Local, TimeZone};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::PostSubmission;

/// Clock that advances one second on every reading.
struct SteppingClock {
    readings: Mutex<i64>,
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut readings = self.readings.lock().expect("clock lock");
        *readings += 1;
        Utc.timestamp_opt(1_700_000_000, 0)
            .single()
            .expect("base timestamp")
            + Duration::seconds(*readings)
    }
}

struct Seeded {
    store: InMemoryBlogStore,
    leo: User,
    mia: User,
}

#[fixture]
fn seeded() -> Seeded {
    let store = InMemoryBlogStore::new(Arc::new(SteppingClock {
        readings: Mutex::new(0),
    }));
    let leo = User::new(UserId::random(), Username::new("leo").expect("username"));
    let mia = User::new(UserId::random(), Username::new("mia").expect("username"));
    store.add_user(leo.clone());
    store.add_user(mia.clone());
    Seeded { store, leo, mia }
}

fn draft(text: &str, group: Option<GroupId>) -> PostDraft {
    PostDraft::try_from_submission(PostSubmission {
        text: Some(text.to_owned()),
        group: group.map(|id| id.to_string()),
        image: None,
    })
    .expect("valid draft")
}

#[rstest]
#[tokio::test]
async fn posts_are_listed_newest_first(seeded: Seeded) {
    let store = &seeded.store;
    let first = PostRepository::create(store, seeded.leo.id(), &draft("one", None))
        .await
        .expect("first");
    let second = PostRepository::create(store, seeded.mia.id(), &draft("two", None))
        .await
        .expect("second");

    let listed = store.list(&FeedScope::All, 0, 10).await.expect("list");
    let ids: Vec<PostId> = listed.iter().map(|post| post.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert!(second.pub_date > first.pub_date);
}

#[rstest]
#[tokio::test]
async fn scopes_select_group_author_and_followed_posts(seeded: Seeded) {
    let store = &seeded.store;
    let cats = GroupRepository::create(
        store,
        &NewGroup::try_new("cats", "Cats", "").expect("group"),
    )
    .await
    .expect("cats");
    let dogs = GroupRepository::create(
        store,
        &NewGroup::try_new("dogs", "Dogs", "").expect("group"),
    )
    .await
    .expect("dogs");
    PostRepository::create(store, seeded.leo.id(), &draft("meow", Some(cats.id())))
        .await
        .expect("cat post");
    PostRepository::create(store, seeded.mia.id(), &draft("woof", Some(dogs.id())))
        .await
        .expect("dog post");
    store
        .insert_if_absent(seeded.mia.id(), seeded.leo.id())
        .await
        .expect("follow");

    assert_eq!(store.count(&FeedScope::Group(cats.id())).await.expect("count"), 1);
    assert_eq!(
        store
            .count(&FeedScope::Author(seeded.mia.id().clone()))
            .await
            .expect("count"),
        1
    );
    let followed = store
        .list(&FeedScope::FollowedBy(seeded.mia.id().clone()), 0, 10)
        .await
        .expect("followed");
    assert_eq!(followed.len(), 1);
    assert_eq!(followed[0].author, seeded.leo);
    assert_eq!(followed[0].group.as_ref(), Some(&cats));
}

#[rstest]
#[tokio::test]
async fn follow_edges_are_unique(seeded: Seeded) {
    let store = &seeded.store;
    assert!(store
        .insert_if_absent(seeded.mia.id(), seeded.leo.id())
        .await
        .expect("first"));
    assert!(!store
        .insert_if_absent(seeded.mia.id(), seeded.leo.id())
        .await
        .expect("second"));
    assert_eq!(store.follow_count(), 1);
    assert!(store.delete(seeded.mia.id(), seeded.leo.id()).await.expect("delete"));
    assert!(!store.delete(seeded.mia.id(), seeded.leo.id()).await.expect("again"));
}

#[rstest]
#[tokio::test]
async fn duplicate_group_slug_is_rejected(seeded: Seeded) {
    let store = &seeded.store;
    let group = NewGroup::try_new("cats", "Cats", "").expect("group");
    GroupRepository::create(store, &group).await.expect("first");
    let err = GroupRepository::create(store, &group)
        .await
        .expect_err("duplicate");
    assert_eq!(err, GroupPersistenceError::duplicate_slug("cats"));
}

#[rstest]
#[tokio::test]
async fn comments_are_listed_oldest_first(seeded: Seeded) {
    let store = &seeded.store;
    let post = PostRepository::create(store, seeded.leo.id(), &draft("hi", None))
        .await
        .expect("post");
    for text in ["first", "second"] {
        CommentRepository::create(
            store,
            post.id,
            seeded.mia.id(),
            &PostText::new(text).expect("text"),
        )
        .await
        .expect("comment");
    }

    let comments = store.list_for_post(post.id).await.expect("comments");
    let texts: Vec<&str> = comments.iter().map(|c| c.text.as_ref()).collect();
    assert_eq!(texts, vec!["first", "second"]);
    assert_eq!(comments[0].author, seeded.mia);
}

#[rstest]
#[tokio::test]
async fn update_keeps_publication_date(seeded: Seeded) {
    let store = &seeded.store;
    let created = PostRepository::create(store, seeded.leo.id(), &draft("draft", None))
        .await
        .expect("post");
    let updated = store
        .update(created.id, &draft("final", None))
        .await
        .expect("update")
        .expect("post exists");
    assert_eq!(updated.text.as_ref(), "final");
    assert_eq!(updated.pub_date, created.pub_date);
    assert!(store
        .update(PostId::new(999), &draft("x", None))
        .await
        .expect("update")
        .is_none());
}

#[rstest]
#[tokio::test]
async fn fixture_store_knows_the_fixture_account() {
    let store = InMemoryBlogStore::with_fixture_user();
    let username = Username::new(FIXTURE_USERNAME).expect("username");
    let user = store
        .find_by_username(&username)
        .await
        .expect("lookup")
        .expect("fixture user");
    assert_eq!(user.id().as_ref(), FIXTURE_USER_ID);
}
