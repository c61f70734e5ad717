//! Repository for the child tables (`tags`, `ingredients`, `characters`)
//! and their parent link tables. Every method takes the [`ChildKind`]
//! selecting which collection to operate on.

use std::collections::HashMap;

use sqlx::PgPool;
use trove_core::types::DbId;

use crate::models::child::{AttachedChild, ChildInfo, ChildKind};

/// Provides owner-scoped CRUD for child rows.
pub struct ChildRepo;

impl ChildRepo {
    /// List the owner's children ordered by name, descending.
    ///
    /// With `assigned_only`, only children attached to at least one parent
    /// are returned, each once.
    pub async fn list_for_owner(
        pool: &PgPool,
        kind: ChildKind,
        owner: DbId,
        assigned_only: bool,
    ) -> Result<Vec<ChildInfo>, sqlx::Error> {
        let query = format!(
            "SELECT c.id, c.name FROM {table} c \
             WHERE c.user_id = $1 \
               AND (NOT $2 OR EXISTS ( \
                   SELECT 1 FROM {link} l WHERE l.{child_col} = c.id)) \
             ORDER BY c.name DESC, c.id DESC",
            table = kind.table,
            link = kind.link_table,
            child_col = kind.child_column,
        );
        sqlx::query_as::<_, ChildInfo>(&query)
            .bind(owner)
            .bind(assigned_only)
            .fetch_all(pool)
            .await
    }

    /// Find one of the owner's children by id.
    pub async fn find_for_owner(
        pool: &PgPool,
        kind: ChildKind,
        owner: DbId,
        id: DbId,
    ) -> Result<Option<ChildInfo>, sqlx::Error> {
        let query = format!(
            "SELECT id, name FROM {} WHERE id = $1 AND user_id = $2",
            kind.table
        );
        sqlx::query_as::<_, ChildInfo>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await
    }

    /// Insert a child. A duplicate `(owner, name)` violates the `uq_*_user_name`
    /// constraint and surfaces as a conflict.
    pub async fn create(
        pool: &PgPool,
        kind: ChildKind,
        owner: DbId,
        name: &str,
    ) -> Result<ChildInfo, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (user_id, name) VALUES ($1, $2) RETURNING id, name",
            kind.table
        );
        sqlx::query_as::<_, ChildInfo>(&query)
            .bind(owner)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Rename a child. `None` keeps the current name.
    ///
    /// Returns `None` if the owner has no child with the given `id`.
    pub async fn rename(
        pool: &PgPool,
        kind: ChildKind,
        owner: DbId,
        id: DbId,
        name: Option<&str>,
    ) -> Result<Option<ChildInfo>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET name = COALESCE($3, name) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING id, name",
            kind.table
        );
        sqlx::query_as::<_, ChildInfo>(&query)
            .bind(id)
            .bind(owner)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a child. Its attachments go with it via `ON DELETE CASCADE`.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        kind: ChildKind,
        owner: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", kind.table);
        let result = sqlx::query(&query)
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Children attached to one parent, ordered by name.
    pub async fn list_for_parent(
        pool: &PgPool,
        kind: ChildKind,
        parent_id: DbId,
    ) -> Result<Vec<ChildInfo>, sqlx::Error> {
        let query = format!(
            "SELECT c.id, c.name FROM {table} c \
             JOIN {link} l ON l.{child_col} = c.id \
             WHERE l.{parent_col} = $1 \
             ORDER BY c.name, c.id",
            table = kind.table,
            link = kind.link_table,
            child_col = kind.child_column,
            parent_col = kind.parent_column,
        );
        sqlx::query_as::<_, ChildInfo>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// Children attached to each of `parent_ids`, loaded in one query and
    /// grouped by parent. Parents without children are absent from the map.
    pub async fn list_for_parents(
        pool: &PgPool,
        kind: ChildKind,
        parent_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<ChildInfo>>, sqlx::Error> {
        if parent_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT l.{parent_col} AS parent_id, c.id, c.name FROM {table} c \
             JOIN {link} l ON l.{child_col} = c.id \
             WHERE l.{parent_col} = ANY($1) \
             ORDER BY c.name, c.id",
            table = kind.table,
            link = kind.link_table,
            child_col = kind.child_column,
            parent_col = kind.parent_column,
        );
        let rows = sqlx::query_as::<_, AttachedChild>(&query)
            .bind(parent_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<ChildInfo>> = HashMap::new();
        for row in rows {
            grouped.entry(row.parent_id).or_default().push(ChildInfo {
                id: row.id,
                name: row.name,
            });
        }
        Ok(grouped)
    }
}
