//! PostgreSQL implementation of [`ChildStore`] over an open transaction.

use async_trait::async_trait;
use sqlx::{PgConnection, Postgres, Transaction};
use trove_core::child_set::{reconcile, ChildDescriptor, ChildStore, ParentRef, ReconcileMode};
use trove_core::types::DbId;

use crate::error::StoreError;
use crate::models::child::ChildKind;

/// Child store bound to one [`ChildKind`] and one connection, normally the
/// transaction that also wrote the parent row.
pub struct PgChildStore<'c> {
    conn: &'c mut PgConnection,
    kind: ChildKind,
}

impl<'c> PgChildStore<'c> {
    pub fn new(conn: &'c mut PgConnection, kind: ChildKind) -> Self {
        Self { conn, kind }
    }
}

#[async_trait]
impl ChildStore for PgChildStore<'_> {
    type Error = StoreError;

    async fn find_by_owner_and_name(
        &mut self,
        owner: DbId,
        name: &str,
    ) -> Result<Option<DbId>, StoreError> {
        let query = format!(
            "SELECT id FROM {} WHERE user_id = $1 AND name = $2",
            self.kind.table
        );
        let id = sqlx::query_scalar::<_, DbId>(&query)
            .bind(owner)
            .bind(name)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(id)
    }

    /// Insert the child, or return the existing id if a concurrent request
    /// created the same `(owner, name)` first.
    async fn create(&mut self, owner: DbId, name: &str) -> Result<DbId, StoreError> {
        let query = format!(
            "INSERT INTO {} (user_id, name) VALUES ($1, $2) \
             ON CONFLICT (user_id, name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id",
            self.kind.table
        );
        let id = sqlx::query_scalar::<_, DbId>(&query)
            .bind(owner)
            .bind(name)
            .fetch_one(&mut *self.conn)
            .await?;
        tracing::debug!(entity = self.kind.entity, id, owner, name, "Created child");
        Ok(id)
    }

    async fn clear_attachments(&mut self, parent_id: DbId) -> Result<(), StoreError> {
        let query = format!(
            "DELETE FROM {} WHERE {} = $1",
            self.kind.link_table, self.kind.parent_column
        );
        sqlx::query(&query)
            .bind(parent_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(())
    }

    async fn add_attachment(&mut self, parent_id: DbId, child_id: DbId) -> Result<(), StoreError> {
        let query = format!(
            "INSERT INTO {} ({}, {}) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            self.kind.link_table, self.kind.parent_column, self.kind.child_column
        );
        sqlx::query(&query)
            .bind(parent_id)
            .bind(child_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(())
    }
}

/// Reconcile one child collection inside the parent's transaction.
pub(crate) async fn reconcile_in(
    tx: &mut Transaction<'_, Postgres>,
    kind: ChildKind,
    parent: ParentRef,
    owner: DbId,
    descriptors: &[ChildDescriptor],
    mode: ReconcileMode,
) -> Result<Vec<DbId>, StoreError> {
    let mut store = PgChildStore::new(&mut **tx, kind);
    reconcile(&mut store, parent, owner, descriptors, mode).await
}
