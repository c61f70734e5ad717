//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every query on an owned
//! entity is filtered by `user_id`, so a row belonging to someone else is
//! indistinguishable from a missing one.

pub mod child_repo;
pub mod child_store;
pub mod makeup_repo;
pub mod movie_repo;
pub mod recipe_repo;
pub mod user_repo;

pub use child_repo::ChildRepo;
pub use child_store::PgChildStore;
pub use makeup_repo::MakeupRepo;
pub use movie_repo::MovieRepo;
pub use recipe_repo::RecipeRepo;
pub use user_repo::UserRepo;
