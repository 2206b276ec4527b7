//! Conversions from Diesel rows to domain values.
//!
//! Stored values are re-validated on the way out; a row that no longer
//! satisfies the domain rules surfaces as a message the caller wraps in its
//! port's query error.

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::{
    Comment, Group, GroupId, ImagePath, NewGroup, Post, PostId, PostText, User, UserId, Username,
};

use super::models::{CommentRow, GroupRow, PostRow, UserRow};

pub(crate) fn user_from_row(row: UserRow) -> Result<User, String> {
    let username = Username::new(row.username)
        .map_err(|err| format!("stored user {} is invalid: {err}", row.id))?;
    Ok(User::new(UserId::from_uuid(row.id), username))
}

pub(crate) fn group_from_row(row: GroupRow) -> Result<Group, String> {
    let details = NewGroup::try_new(row.slug, row.title, row.description)
        .map_err(|err| format!("stored group {} is invalid: {err}", row.id))?;
    Ok(Group::new(GroupId::new(row.id), details))
}

fn users_by_id(rows: Vec<UserRow>) -> Result<HashMap<Uuid, User>, String> {
    rows.into_iter()
        .map(|row| {
            let id = row.id;
            user_from_row(row).map(|user| (id, user))
        })
        .collect()
}

/// Join post rows with their already loaded authors and groups.
pub(crate) fn posts_from_rows(
    rows: Vec<PostRow>,
    authors: Vec<UserRow>,
    groups: Vec<GroupRow>,
) -> Result<Vec<Post>, String> {
    let authors = users_by_id(authors)?;
    let groups: HashMap<i64, Group> = groups
        .into_iter()
        .map(|row| {
            let id = row.id;
            group_from_row(row).map(|group| (id, group))
        })
        .collect::<Result<_, _>>()?;

    rows.into_iter()
        .map(|row| {
            let author = authors
                .get(&row.author_id)
                .cloned()
                .ok_or_else(|| format!("post {} references a missing author", row.id))?;
            let text = PostText::new(&row.text)
                .map_err(|err| format!("stored post {} is invalid: {err}", row.id))?;
            let image = row
                .image
                .map(ImagePath::new)
                .transpose()
                .map_err(|err| format!("stored post {} image is invalid: {err}", row.id))?;
            Ok(Post {
                id: PostId::new(row.id),
                text,
                pub_date: row.pub_date,
                author,
                group: row.group_id.and_then(|id| groups.get(&id).cloned()),
                image,
            })
        })
        .collect()
}

/// Join comment rows with their already loaded authors.
pub(crate) fn comments_from_rows(
    rows: Vec<CommentRow>,
    authors: Vec<UserRow>,
) -> Result<Vec<Comment>, String> {
    let authors = users_by_id(authors)?;
    rows.into_iter()
        .map(|row| {
            let author = authors
                .get(&row.author_id)
                .cloned()
                .ok_or_else(|| format!("comment {} references a missing author", row.id))?;
            let text = PostText::new(&row.text)
                .map_err(|err| format!("stored comment {} is invalid: {err}", row.id))?;
            Ok(Comment {
                id: row.id,
                post_id: PostId::new(row.post_id),
                author,
                text,
                created: row.created,
            })
        })
        .collect()
}
