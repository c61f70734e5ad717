pub mod child;
pub mod makeup;
pub mod movie;
pub mod recipe;
pub mod user;
