//! Domain types, validation rules, and the owned child-collection
//! reconciliation engine shared by the persistence and HTTP layers.
//!
//! Nothing in this crate touches the database or the network.

pub mod child_set;
pub mod error;
pub mod ids;
pub mod money;
pub mod types;
pub mod upload;
pub mod user;
pub mod validation;
