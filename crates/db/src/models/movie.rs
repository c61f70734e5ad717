//! Movie entity model, response shape and DTOs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trove_core::child_set::ChildDescriptor;
use trove_core::error::CoreError;
use trove_core::money::check_rating;
use trove_core::types::{DbId, Timestamp};
use trove_core::validation::validate;
use validator::Validate;

use crate::models::child::ChildInfo;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow)]
pub struct Movie {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub release_date: NaiveDate,
    pub ratings: Decimal,
    pub director: String,
    pub producer: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Movie with its attached characters, used for list and detail responses.
#[derive(Debug, Clone, Serialize)]
pub struct MovieResponse {
    pub id: DbId,
    pub name: String,
    pub release_date: NaiveDate,
    pub ratings: Decimal,
    pub director: String,
    pub producer: String,
    pub characters: Vec<ChildInfo>,
}

impl MovieResponse {
    pub fn new(movie: Movie, characters: Vec<ChildInfo>) -> Self {
        Self {
            id: movie.id,
            name: movie.name,
            release_date: movie.release_date,
            ratings: movie.ratings,
            director: movie.director,
            producer: movie.producer,
            characters,
        }
    }
}

/// DTO for creating a movie (and for full replacement via PUT).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMovie {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub release_date: NaiveDate,
    pub ratings: Decimal,
    #[validate(length(min = 1, max = 255))]
    pub director: String,
    #[validate(length(min = 1, max = 255))]
    pub producer: String,
    #[serde(default)]
    pub characters: Option<Vec<ChildDescriptor>>,
}

impl CreateMovie {
    pub fn check(&self) -> Result<(), CoreError> {
        validate(self)?;
        check_rating(self.ratings)
    }
}

/// DTO for a partial update. An absent `characters` list is left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMovie {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub ratings: Option<Decimal>,
    #[validate(length(min = 1, max = 255))]
    pub director: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub producer: Option<String>,
    pub characters: Option<Vec<ChildDescriptor>>,
}

impl UpdateMovie {
    pub fn check(&self) -> Result<(), CoreError> {
        validate(self)?;
        match self.ratings {
            Some(ratings) => check_rating(ratings),
            None => Ok(()),
        }
    }
}

impl From<CreateMovie> for UpdateMovie {
    fn from(input: CreateMovie) -> Self {
        Self {
            name: Some(input.name),
            release_date: Some(input.release_date),
            ratings: Some(input.ratings),
            director: Some(input.director),
            producer: Some(input.producer),
            characters: input.characters,
        }
    }
}
