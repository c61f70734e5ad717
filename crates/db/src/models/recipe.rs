//! Recipe entity model, response shapes and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trove_core::child_set::ChildDescriptor;
use trove_core::error::CoreError;
use trove_core::money::check_price;
use trove_core::types::{DbId, Timestamp};
use trove_core::validation::validate;
use validator::Validate;

use crate::models::child::ChildInfo;

/// A row from the `recipes` table.
#[derive(Debug, Clone, FromRow)]
pub struct Recipe {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: String,
    pub description: String,
    /// Path relative to the media root, e.g. `uploads/recipe/<uuid>.jpg`.
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List shape: scalars plus the attached tags and ingredients.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummary {
    pub id: DbId,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: String,
    pub tags: Vec<ChildInfo>,
    pub ingredients: Vec<ChildInfo>,
}

/// Detail shape: the list shape plus `description` and `image`.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    pub description: String,
    pub image: Option<String>,
}

impl RecipeSummary {
    pub fn new(recipe: &Recipe, tags: Vec<ChildInfo>, ingredients: Vec<ChildInfo>) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link.clone(),
            tags,
            ingredients,
        }
    }
}

impl RecipeDetail {
    pub fn new(recipe: Recipe, tags: Vec<ChildInfo>, ingredients: Vec<ChildInfo>) -> Self {
        Self {
            summary: RecipeSummary::new(&recipe, tags, ingredients),
            description: recipe.description,
            image: recipe.image,
        }
    }
}

/// Response body of the image upload endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeImage {
    pub id: DbId,
    pub image: Option<String>,
}

/// DTO for creating a recipe.
///
/// `tags` and `ingredients` are inline child descriptors; a missing list
/// means "no children" on create and "leave unchanged" on update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecipe {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(range(min = 0))]
    pub time_minutes: i32,
    pub price: Decimal,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Option<Vec<ChildDescriptor>>,
    #[serde(default)]
    pub ingredients: Option<Vec<ChildDescriptor>>,
}

impl CreateRecipe {
    /// Field-level checks that do not need the database.
    pub fn check(&self) -> Result<(), CoreError> {
        validate(self)?;
        check_price(self.price)
    }
}

/// DTO for a partial update. `None` leaves the field or collection unchanged;
/// `Some(vec![])` clears a collection.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRecipe {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(range(min = 0))]
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    #[validate(length(max = 255))]
    pub link: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<ChildDescriptor>>,
    pub ingredients: Option<Vec<ChildDescriptor>>,
}

impl UpdateRecipe {
    pub fn check(&self) -> Result<(), CoreError> {
        validate(self)?;
        match self.price {
            Some(price) => check_price(price),
            None => Ok(()),
        }
    }
}

/// DTO for `PUT`. The required scalars must be present; `link` and
/// `description` may be blank and so stay unchanged when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceRecipe {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<ChildDescriptor>>,
    pub ingredients: Option<Vec<ChildDescriptor>>,
}

impl From<ReplaceRecipe> for UpdateRecipe {
    fn from(input: ReplaceRecipe) -> Self {
        Self {
            title: Some(input.title),
            time_minutes: Some(input.time_minutes),
            price: Some(input.price),
            link: input.link,
            description: input.description,
            tags: input.tags,
            ingredients: input.ingredients,
        }
    }
}

/// Any-of filters for the recipe list. An empty list disables that filter.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub tag_ids: Vec<DbId>,
    pub ingredient_ids: Vec<DbId>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::*;

    fn sample() -> CreateRecipe {
        CreateRecipe {
            title: "Sample recipe".into(),
            time_minutes: 22,
            price: Decimal::from_str("5.25").unwrap(),
            link: String::new(),
            description: String::new(),
            tags: None,
            ingredients: None,
        }
    }

    #[test]
    fn valid_recipe_passes() {
        assert!(sample().check().is_ok());
    }

    #[test]
    fn negative_time_is_rejected() {
        let input = CreateRecipe {
            time_minutes: -1,
            ..sample()
        };
        assert_matches!(input.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn price_with_three_decimals_is_rejected() {
        let input = CreateRecipe {
            price: Decimal::from_str("1.005").unwrap(),
            ..sample()
        };
        assert_matches!(input.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn put_body_leaves_omitted_blankable_fields_unset() {
        let body: ReplaceRecipe = serde_json::from_value(serde_json::json!({
            "title": "Sample recipe",
            "time_minutes": 10,
            "price": "5.00",
        }))
        .unwrap();
        let update = UpdateRecipe::from(body);
        assert_eq!(update.title.as_deref(), Some("Sample recipe"));
        assert!(update.link.is_none());
        assert!(update.description.is_none());
        assert!(update.tags.is_none());
    }

    #[test]
    fn put_body_without_title_is_rejected() {
        let body = serde_json::from_value::<ReplaceRecipe>(serde_json::json!({
            "time_minutes": 10,
            "price": "5.00",
        }));
        assert!(body.is_err());
    }

    #[test]
    fn empty_patch_is_valid() {
        assert!(UpdateRecipe::default().check().is_ok());
    }
}
