//! PostgreSQL-backed `GroupRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GroupPersistenceError, GroupRepository};
use crate::domain::{Group, GroupId, GroupSlug, NewGroup};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{GroupRow, NewGroupRow};
use super::pool::{DbPool, PoolError};
use super::row_mapping::group_from_row;
use super::schema::groups;

/// Diesel-backed implementation of the `GroupRepository` port.
#[derive(Clone)]
pub struct DieselGroupRepository {
    pool: DbPool,
}

impl DieselGroupRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GroupPersistenceError {
    map_basic_pool_error(error, |message| GroupPersistenceError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> GroupPersistenceError {
    map_basic_diesel_error(
        error,
        |message| GroupPersistenceError::query(message),
        |message| GroupPersistenceError::connection(message),
    )
}

fn to_group(row: GroupRow) -> Result<Group, GroupPersistenceError> {
    group_from_row(row).map_err(|message| GroupPersistenceError::query(message))
}

#[async_trait]
impl GroupRepository for DieselGroupRepository {
    async fn find_by_slug(&self, slug: &GroupSlug) -> Result<Option<Group>, GroupPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = groups::table
            .filter(groups::slug.eq(slug.as_ref()))
            .select(GroupRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_group).transpose()
    }

    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, GroupPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = groups::table
            .find(id.get())
            .select(GroupRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_group).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Group>, GroupPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GroupRow> = groups::table
            .order((groups::title.asc(), groups::id.asc()))
            .select(GroupRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_group).collect()
    }

    async fn create(&self, group: &NewGroup) -> Result<Group, GroupPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewGroupRow {
            title: group.title(),
            slug: group.slug().as_ref(),
            description: group.description(),
        };
        let stored = diesel::insert_into(groups::table)
            .values(&row)
            .returning(GroupRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if unique_violation(&err).is_some() {
                    GroupPersistenceError::duplicate_slug(group.slug().as_ref())
                } else {
                    map_diesel_error(err)
                }
            })?;
        to_group(stored)
    }
}
