//! Repository for the `recipes` table.
//!
//! Creates and updates run in one transaction together with the tag and
//! ingredient reconciliation they trigger, so a rejected descriptor leaves
//! no half-written recipe behind.

use sqlx::PgPool;
use trove_core::child_set::{ParentRef, ReconcileMode};
use trove_core::types::DbId;

use crate::error::StoreError;
use crate::models::child::{INGREDIENTS, TAGS};
use crate::models::recipe::{
    CreateRecipe, Recipe, RecipeDetail, RecipeFilter, RecipeSummary, UpdateRecipe,
};
use crate::repositories::child_store::reconcile_in;
use crate::repositories::ChildRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, time_minutes, price, link, description, image, \
                       created_at, updated_at";

/// Provides owner-scoped CRUD operations for recipes.
pub struct RecipeRepo;

impl RecipeRepo {
    /// Insert a recipe for `owner` and attach the tags and ingredients it
    /// names, creating any the owner does not have yet.
    pub async fn create(
        pool: &PgPool,
        owner: DbId,
        input: &CreateRecipe,
    ) -> Result<Recipe, StoreError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO recipes (user_id, title, time_minutes, price, link, description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(owner)
            .bind(&input.title)
            .bind(input.time_minutes)
            .bind(input.price)
            .bind(&input.link)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        let parent = ParentRef {
            id: recipe.id,
            owner: recipe.user_id,
        };
        let empty = Vec::new();
        let tags = input.tags.as_ref().unwrap_or(&empty);
        let ingredients = input.ingredients.as_ref().unwrap_or(&empty);
        reconcile_in(&mut tx, TAGS, parent, owner, tags, ReconcileMode::Create).await?;
        reconcile_in(&mut tx, INGREDIENTS, parent, owner, ingredients, ReconcileMode::Create)
            .await?;

        tx.commit().await?;
        Ok(recipe)
    }

    /// Find one of the owner's recipes by id.
    pub async fn find_for_owner(
        pool: &PgPool,
        owner: DbId,
        id: DbId,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await
    }

    /// List the owner's recipes, newest first.
    ///
    /// Non-empty `filter` lists keep recipes carrying at least one of the
    /// given tags (and at least one of the given ingredients). Each recipe
    /// appears once however many filter ids it matches.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner: DbId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipes r
             WHERE r.user_id = $1
               AND (cardinality($2::bigint[]) = 0 OR EXISTS (
                   SELECT 1 FROM recipe_tags rt
                   WHERE rt.recipe_id = r.id AND rt.tag_id = ANY($2)))
               AND (cardinality($3::bigint[]) = 0 OR EXISTS (
                   SELECT 1 FROM recipe_ingredients ri
                   WHERE ri.recipe_id = r.id AND ri.ingredient_id = ANY($3)))
             ORDER BY r.id DESC"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(owner)
            .bind(&filter.tag_ids)
            .bind(&filter.ingredient_ids)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Collections present in `input` are
    /// reconciled (an empty list clears); absent ones are left untouched.
    ///
    /// Returns `None` if the owner has no recipe with the given `id`.
    pub async fn update(
        pool: &PgPool,
        owner: DbId,
        id: DbId,
        input: &UpdateRecipe,
    ) -> Result<Option<Recipe>, StoreError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE recipes SET
                title = COALESCE($3, title),
                time_minutes = COALESCE($4, time_minutes),
                price = COALESCE($5, price),
                link = COALESCE($6, link),
                description = COALESCE($7, description)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        let Some(recipe) = sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(owner)
            .bind(&input.title)
            .bind(input.time_minutes)
            .bind(input.price)
            .bind(&input.link)
            .bind(&input.description)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let parent = ParentRef {
            id: recipe.id,
            owner: recipe.user_id,
        };
        if let Some(tags) = &input.tags {
            reconcile_in(&mut tx, TAGS, parent, owner, tags, ReconcileMode::Update).await?;
        }
        if let Some(ingredients) = &input.ingredients {
            reconcile_in(&mut tx, INGREDIENTS, parent, owner, ingredients, ReconcileMode::Update)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(recipe))
    }

    /// Point the recipe at a newly stored image.
    ///
    /// Returns `None` if the owner has no recipe with the given `id`.
    pub async fn set_image(
        pool: &PgPool,
        owner: DbId,
        id: DbId,
        image: &str,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!(
            "UPDATE recipes SET image = $3 WHERE id = $1 AND user_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(owner)
            .bind(image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a recipe. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, owner: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Attach tags and ingredients to a page of recipes with two queries.
    pub async fn summaries(
        pool: &PgPool,
        recipes: &[Recipe],
    ) -> Result<Vec<RecipeSummary>, sqlx::Error> {
        let ids: Vec<DbId> = recipes.iter().map(|r| r.id).collect();
        let mut tags = ChildRepo::list_for_parents(pool, TAGS, &ids).await?;
        let mut ingredients = ChildRepo::list_for_parents(pool, INGREDIENTS, &ids).await?;

        Ok(recipes
            .iter()
            .map(|recipe| {
                RecipeSummary::new(
                    recipe,
                    tags.remove(&recipe.id).unwrap_or_default(),
                    ingredients.remove(&recipe.id).unwrap_or_default(),
                )
            })
            .collect())
    }

    /// Load the detail shape of a single recipe.
    pub async fn detail(pool: &PgPool, recipe: Recipe) -> Result<RecipeDetail, sqlx::Error> {
        let tags = ChildRepo::list_for_parent(pool, TAGS, recipe.id).await?;
        let ingredients = ChildRepo::list_for_parent(pool, INGREDIENTS, recipe.id).await?;
        Ok(RecipeDetail::new(recipe, tags, ingredients))
    }
}

