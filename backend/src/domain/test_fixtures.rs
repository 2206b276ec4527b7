//! Builders for domain values used across unit tests.

use chrono::{DateTime, TimeZone, Utc};

use super::{
    Comment, Group, GroupId, NewGroup, Post, PostId, PostText, User, UserId, Username,
};

pub(crate) fn user(name: &str) -> User {
    User::new(
        UserId::random(),
        Username::new(name).expect("fixture username"),
    )
}

pub(crate) fn group(id: i64, slug: &str) -> Group {
    let details = NewGroup::try_new(slug, slug.to_uppercase(), "").expect("fixture group");
    Group::new(GroupId::new(id), details)
}

pub(crate) fn timestamp(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_600_000_000 + seconds, 0)
        .single()
        .expect("fixture timestamp")
}

pub(crate) fn post(id: i64, author: &User, text: &str) -> Post {
    Post {
        id: PostId::new(id),
        text: PostText::new(text).expect("fixture text"),
        pub_date: timestamp(id),
        author: author.clone(),
        group: None,
        image: None,
    }
}

pub(crate) fn comment(id: i64, post: &Post, author: &User, text: &str) -> Comment {
    Comment {
        id,
        post_id: post.id,
        author: author.clone(),
        text: PostText::new(text).expect("fixture text"),
        created: timestamp(id),
    }
}
