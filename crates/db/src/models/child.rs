//! Owned child entities: tags, ingredients and characters.
//!
//! The three tables share one shape (`id`, `user_id`, `name`, timestamps)
//! and differ only in which parent link table references them, so a single
//! set of structs serves all of them and [`ChildKind`] picks the tables.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trove_core::types::{DbId, Timestamp};

/// Table descriptor selecting one child collection.
///
/// All names are compile-time constants, which is what makes splicing them
/// into SQL text safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildKind {
    /// Entity name used in error messages and logs.
    pub entity: &'static str,
    /// Child table, e.g. `tags`.
    pub table: &'static str,
    /// Parent link table, e.g. `recipe_tags`.
    pub link_table: &'static str,
    /// Column of `link_table` referencing the parent.
    pub parent_column: &'static str,
    /// Column of `link_table` referencing the child.
    pub child_column: &'static str,
}

pub const TAGS: ChildKind = ChildKind {
    entity: "Tag",
    table: "tags",
    link_table: "recipe_tags",
    parent_column: "recipe_id",
    child_column: "tag_id",
};

pub const INGREDIENTS: ChildKind = ChildKind {
    entity: "Ingredient",
    table: "ingredients",
    link_table: "recipe_ingredients",
    parent_column: "recipe_id",
    child_column: "ingredient_id",
};

pub const CHARACTERS: ChildKind = ChildKind {
    entity: "Character",
    table: "characters",
    link_table: "movie_characters",
    parent_column: "movie_id",
    child_column: "character_id",
};

/// A row from any of the child tables.
#[derive(Debug, Clone, FromRow)]
pub struct Child {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The `{id, name}` shape used both for child endpoints and when nesting
/// children inside a parent response.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ChildInfo {
    pub id: DbId,
    pub name: String,
}

impl From<Child> for ChildInfo {
    fn from(child: Child) -> Self {
        Self {
            id: child.id,
            name: child.name,
        }
    }
}

/// A child together with the parent it is attached to, for batch loading.
#[derive(Debug, Clone, FromRow)]
pub struct AttachedChild {
    pub parent_id: DbId,
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a child directly (`POST /characters`).
///
/// The name is trimmed and checked with
/// [`trove_core::child_set::validate_name`] before it reaches the database.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChild {
    pub name: String,
}

/// DTO for renaming a child. `None` leaves the name unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateChild {
    pub name: Option<String>,
}
