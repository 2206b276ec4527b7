//! PostgreSQL-backed `PostRepository`.
//!
//! Every feed shares one scoped query so counts and pages always agree on
//! which posts are in view. Rows are hydrated with their authors and groups in
//! two batched lookups per page.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::{FeedScope, Post, PostDraft, PostId, UserId};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, to_sql_bigint,
};
use super::models::{GroupRow, NewPostRow, PostRow, PostUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::row_mapping::posts_from_rows;
use super::schema::{follows, groups, posts, users};

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostPersistenceError {
    map_basic_pool_error(error, |message| PostPersistenceError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> PostPersistenceError {
    map_basic_diesel_error(
        error,
        |message| PostPersistenceError::query(message),
        |message| PostPersistenceError::connection(message),
    )
}

fn scoped(scope: &FeedScope) -> posts::BoxedQuery<'static, Pg> {
    let query = posts::table.into_boxed();
    match scope {
        FeedScope::All => query,
        FeedScope::Group(group) => query.filter(posts::group_id.eq(group.get())),
        FeedScope::Author(author) => query.filter(posts::author_id.eq(*author.as_uuid())),
        FeedScope::FollowedBy(follower) => query.filter(
            posts::author_id.eq_any(
                follows::table
                    .filter(follows::user_id.eq(*follower.as_uuid()))
                    .select(follows::author_id),
            ),
        ),
    }
}

async fn hydrate(
    conn: &mut AsyncPgConnection,
    rows: Vec<PostRow>,
) -> Result<Vec<Post>, PostPersistenceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let mut author_ids: Vec<Uuid> = rows.iter().map(|row| row.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let mut group_ids: Vec<i64> = rows.iter().filter_map(|row| row.group_id).collect();
    group_ids.sort_unstable();
    group_ids.dedup();

    let authors: Vec<UserRow> = users::table
        .filter(users::id.eq_any(author_ids))
        .select(UserRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    let groups: Vec<GroupRow> = if group_ids.is_empty() {
        Vec::new()
    } else {
        groups::table
            .filter(groups::id.eq_any(group_ids))
            .select(GroupRow::as_select())
            .load(conn)
            .await
            .map_err(map_diesel_error)?
    };

    posts_from_rows(rows, authors, groups).map_err(|message| PostPersistenceError::query(message))
}

async fn hydrate_one(
    conn: &mut AsyncPgConnection,
    row: PostRow,
) -> Result<Post, PostPersistenceError> {
    let id = row.id;
    hydrate(conn, vec![row])
        .await?
        .pop()
        .ok_or_else(|| PostPersistenceError::query(format!("post {id} vanished during load")))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn count(&self, scope: &FeedScope) -> Result<u64, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = scoped(scope)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn list(
        &self,
        scope: &FeedScope,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PostRow> = scoped(scope)
            .order((posts::pub_date.desc(), posts::id.desc()))
            .offset(to_sql_bigint(offset))
            .limit(to_sql_bigint(limit))
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        hydrate(&mut conn, rows).await
    }

    async fn find(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = posts::table
            .find(id.get())
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        match row {
            Some(row) => hydrate_one(&mut conn, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn create(
        &self,
        author: &UserId,
        draft: &PostDraft,
    ) -> Result<Post, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPostRow {
            text: draft.text().as_ref(),
            author_id: *author.as_uuid(),
            group_id: draft.group().map(|group| group.get()),
            image: draft.image().map(|image| image.as_ref()),
        };
        let stored = diesel::insert_into(posts::table)
            .values(&row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        hydrate_one(&mut conn, stored).await
    }

    async fn update(
        &self,
        id: PostId,
        draft: &PostDraft,
    ) -> Result<Option<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = PostUpdate {
            text: draft.text().as_ref(),
            group_id: draft.group().map(|group| group.get()),
            image: draft.image().map(|image| image.as_ref()),
        };
        let updated = diesel::update(posts::table.find(id.get()))
            .set(&changes)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        match updated {
            Some(row) => hydrate_one(&mut conn, row).await.map(Some),
            None => Ok(None),
        }
    }
}
