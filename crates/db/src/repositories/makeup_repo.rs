//! Repository for the `makeups` table.

use sqlx::PgPool;
use trove_core::types::DbId;

use crate::models::makeup::{CreateMakeup, Makeup, UpdateMakeup};

const COLUMNS: &str =
    "id, user_id, name, items, sequence_steps, cost, time, created_at, updated_at";

/// Provides owner-scoped CRUD operations for makeups.
pub struct MakeupRepo;

impl MakeupRepo {
    pub async fn create(
        pool: &PgPool,
        owner: DbId,
        input: &CreateMakeup,
    ) -> Result<Makeup, sqlx::Error> {
        let query = format!(
            "INSERT INTO makeups (user_id, name, items, sequence_steps, cost, time)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Makeup>(&query)
            .bind(owner)
            .bind(&input.name)
            .bind(&input.items)
            .bind(&input.sequence_steps)
            .bind(input.cost)
            .bind(input.time)
            .fetch_one(pool)
            .await
    }

    pub async fn find_for_owner(
        pool: &PgPool,
        owner: DbId,
        id: DbId,
    ) -> Result<Option<Makeup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM makeups WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Makeup>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await
    }

    /// List the owner's makeups, newest first.
    pub async fn list_for_owner(pool: &PgPool, owner: DbId) -> Result<Vec<Makeup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM makeups WHERE user_id = $1 ORDER BY id DESC");
        sqlx::query_as::<_, Makeup>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await
    }

    /// Update a makeup. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the owner has no makeup with the given `id`.
    pub async fn update(
        pool: &PgPool,
        owner: DbId,
        id: DbId,
        input: &UpdateMakeup,
    ) -> Result<Option<Makeup>, sqlx::Error> {
        let query = format!(
            "UPDATE makeups SET
                name = COALESCE($3, name),
                items = COALESCE($4, items),
                sequence_steps = COALESCE($5, sequence_steps),
                cost = COALESCE($6, cost),
                time = COALESCE($7, time)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Makeup>(&query)
            .bind(id)
            .bind(owner)
            .bind(&input.name)
            .bind(&input.items)
            .bind(&input.sequence_steps)
            .bind(input.cost)
            .bind(input.time)
            .fetch_optional(pool)
            .await
    }

    /// Delete a makeup. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, owner: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM makeups WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
