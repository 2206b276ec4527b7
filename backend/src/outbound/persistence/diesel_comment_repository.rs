//! PostgreSQL-backed `CommentRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{CommentPersistenceError, CommentRepository};
use crate::domain::{Comment, PostId, PostText, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CommentRow, NewCommentRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::row_mapping::comments_from_rows;
use super::schema::{comments, users};

/// Diesel-backed implementation of the `CommentRepository` port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentPersistenceError {
    map_basic_pool_error(error, |message| CommentPersistenceError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> CommentPersistenceError {
    map_basic_diesel_error(
        error,
        |message| CommentPersistenceError::query(message),
        |message| CommentPersistenceError::connection(message),
    )
}

async fn with_authors(
    conn: &mut AsyncPgConnection,
    rows: Vec<CommentRow>,
) -> Result<Vec<Comment>, CommentPersistenceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let mut author_ids: Vec<Uuid> = rows.iter().map(|row| row.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let authors: Vec<UserRow> = users::table
        .filter(users::id.eq_any(author_ids))
        .select(UserRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    comments_from_rows(rows, authors).map_err(|message| CommentPersistenceError::query(message))
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn list_for_post(&self, post: PostId) -> Result<Vec<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CommentRow> = comments::table
            .filter(comments::post_id.eq(post.get()))
            .order((comments::created.asc(), comments::id.asc()))
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        with_authors(&mut conn, rows).await
    }

    async fn create(
        &self,
        post: PostId,
        author: &UserId,
        text: &PostText,
    ) -> Result<Comment, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCommentRow {
            post_id: post.get(),
            author_id: *author.as_uuid(),
            text: text.as_ref(),
        };
        let stored = diesel::insert_into(comments::table)
            .values(&row)
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let id = stored.id;
        with_authors(&mut conn, vec![stored])
            .await?
            .pop()
            .ok_or_else(|| CommentPersistenceError::query(format!("comment {id} vanished")))
    }
}
