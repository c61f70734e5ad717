//! Repository for the `movies` table.

use sqlx::PgPool;
use trove_core::child_set::{ParentRef, ReconcileMode};
use trove_core::types::DbId;

use crate::error::StoreError;
use crate::models::child::CHARACTERS;
use crate::models::movie::{CreateMovie, Movie, MovieResponse, UpdateMovie};
use crate::repositories::child_store::reconcile_in;
use crate::repositories::ChildRepo;

const COLUMNS: &str =
    "id, user_id, name, release_date, ratings, director, producer, created_at, updated_at";

/// Provides owner-scoped CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a movie for `owner` together with the characters it names.
    pub async fn create(
        pool: &PgPool,
        owner: DbId,
        input: &CreateMovie,
    ) -> Result<Movie, StoreError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO movies (user_id, name, release_date, ratings, director, producer)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(owner)
            .bind(&input.name)
            .bind(input.release_date)
            .bind(input.ratings)
            .bind(&input.director)
            .bind(&input.producer)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(characters) = &input.characters {
            let parent = ParentRef {
                id: movie.id,
                owner: movie.user_id,
            };
            reconcile_in(&mut tx, CHARACTERS, parent, owner, characters, ReconcileMode::Create)
                .await?;
        }

        tx.commit().await?;
        Ok(movie)
    }

    pub async fn find_for_owner(
        pool: &PgPool,
        owner: DbId,
        id: DbId,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await
    }

    /// List the owner's movies, newest first.
    pub async fn list_for_owner(pool: &PgPool, owner: DbId) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE user_id = $1 ORDER BY id DESC");
        sqlx::query_as::<_, Movie>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update; `characters` is reconciled only when present.
    ///
    /// Returns `None` if the owner has no movie with the given `id`.
    pub async fn update(
        pool: &PgPool,
        owner: DbId,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, StoreError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE movies SET
                name = COALESCE($3, name),
                release_date = COALESCE($4, release_date),
                ratings = COALESCE($5, ratings),
                director = COALESCE($6, director),
                producer = COALESCE($7, producer)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        let Some(movie) = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(owner)
            .bind(&input.name)
            .bind(input.release_date)
            .bind(input.ratings)
            .bind(&input.director)
            .bind(&input.producer)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(characters) = &input.characters {
            let parent = ParentRef {
                id: movie.id,
                owner: movie.user_id,
            };
            reconcile_in(&mut tx, CHARACTERS, parent, owner, characters, ReconcileMode::Update)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(movie))
    }

    /// Delete a movie. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, owner: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Attach characters to a list of movies with one query.
    pub async fn responses(
        pool: &PgPool,
        movies: Vec<Movie>,
    ) -> Result<Vec<MovieResponse>, sqlx::Error> {
        let ids: Vec<DbId> = movies.iter().map(|m| m.id).collect();
        let mut characters = ChildRepo::list_for_parents(pool, CHARACTERS, &ids).await?;
        Ok(movies
            .into_iter()
            .map(|movie| {
                let attached = characters.remove(&movie.id).unwrap_or_default();
                MovieResponse::new(movie, attached)
            })
            .collect())
    }

    pub async fn response(pool: &PgPool, movie: Movie) -> Result<MovieResponse, sqlx::Error> {
        let characters = ChildRepo::list_for_parent(pool, CHARACTERS, movie.id).await?;
        Ok(MovieResponse::new(movie, characters))
    }
}
