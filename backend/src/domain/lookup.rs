//! Lookups shared by the read and write services.

use crate::domain::ports::{PostRepository, UserRepository};
use crate::domain::{Error, Post, PostId, User, Username};

/// Resolve a username from a URL path; invalid or unknown names are `not_found`.
pub(crate) async fn find_author(users: &dyn UserRepository, username: &str) -> Result<User, Error> {
    let not_found = || Error::not_found(format!("user {username} not found"));
    let Ok(username) = Username::new(username) else {
        return Err(not_found());
    };
    users.find_by_username(&username).await?.ok_or_else(not_found)
}

/// Fetch a post only if `author` wrote it.
pub(crate) async fn find_authored_post(
    posts: &dyn PostRepository,
    author: &User,
    post_id: PostId,
) -> Result<Post, Error> {
    posts
        .find(post_id)
        .await?
        .filter(|post| post.author.id() == author.id())
        .ok_or_else(|| Error::not_found(format!("post {post_id} not found")))
}
