//! Domain error type shared by every layer.
//!
//! Handlers convert these into HTTP responses in `trove_api::error`; the
//! variant decides the status code, so pick the variant by what the caller
//! did wrong rather than by where the failure was detected.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity does not exist, or it exists but belongs to another owner.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed input: a bad scalar field or a child descriptor without a name.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// No credentials, or credentials that no longer verify.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but acting on something the caller does not own.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(crate::validation::describe(&errors))
    }
}
