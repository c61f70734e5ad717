//! Makeup entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trove_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `makeups` table. Serialized as-is for responses, minus
/// the owner and audit columns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Makeup {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub name: String,
    pub items: String,
    pub sequence_steps: String,
    pub cost: i32,
    /// Minutes.
    pub time: i32,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// DTO for creating a makeup (and for full replacement via PUT).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMakeup {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub items: String,
    #[validate(length(min = 1, max = 255))]
    pub sequence_steps: String,
    #[validate(range(min = 0))]
    pub cost: i32,
    #[validate(range(min = 0))]
    pub time: i32,
}

/// DTO for a partial update. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMakeup {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub items: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub sequence_steps: Option<String>,
    #[validate(range(min = 0))]
    pub cost: Option<i32>,
    #[validate(range(min = 0))]
    pub time: Option<i32>,
}

impl From<CreateMakeup> for UpdateMakeup {
    fn from(input: CreateMakeup) -> Self {
        Self {
            name: Some(input.name),
            items: Some(input.items),
            sequence_steps: Some(input.sequence_steps),
            cost: Some(input.cost),
            time: Some(input.time),
        }
    }
}
