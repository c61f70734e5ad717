//! Error type for repository operations that combine domain rules with
//! database writes (the parent create/update paths that reconcile children).

use trove_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
