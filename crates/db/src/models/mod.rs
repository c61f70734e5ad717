//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Serializable response shapes where the row is not returned as-is
//! - `Deserialize` + `Validate` create and update DTOs

pub mod child;
pub mod makeup;
pub mod movie;
pub mod recipe;
pub mod user;
