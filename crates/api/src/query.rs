//! Shared query parameter types for list endpoints.

use serde::Deserialize;
use trove_core::error::CoreError;
use trove_core::ids::parse_id_list;
use trove_db::models::recipe::RecipeFilter;

/// `GET /recipes?tags=1,2&ingredients=3`.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListParams {
    pub tags: Option<String>,
    pub ingredients: Option<String>,
}

impl RecipeListParams {
    /// Parse the comma-separated id lists into a repository filter.
    pub fn to_filter(&self) -> Result<RecipeFilter, CoreError> {
        let ids = |raw: &Option<String>| match raw {
            Some(raw) => parse_id_list(raw),
            None => Ok(Vec::new()),
        };
        Ok(RecipeFilter {
            tag_ids: ids(&self.tags)?,
            ingredient_ids: ids(&self.ingredients)?,
        })
    }
}

/// `GET /tags?assigned_only=1`. Accepts `1`/`0` as well as `true`/`false`.
#[derive(Debug, Default, Deserialize)]
pub struct AssignedOnlyParams {
    pub assigned_only: Option<String>,
}

impl AssignedOnlyParams {
    pub fn assigned_only(&self) -> Result<bool, CoreError> {
        match self.assigned_only.as_deref().map(str::trim) {
            None | Some("") | Some("0") | Some("false") => Ok(false),
            Some("1") | Some("true") => Ok(true),
            Some(other) => Err(CoreError::Validation(format!(
                "assigned_only: expected 0 or 1, got '{other}'"
            ))),
        }
    }
}
