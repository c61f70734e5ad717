//! PostgreSQL persistence: connection pool, migrations, row models and the
//! owner-scoped repositories.

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod repositories;

pub use error::StoreError;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply every pending migration from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Call `check` until it succeeds, sleeping `delay` between attempts.
///
/// Returns the last error once `attempts` calls have failed. At least one
/// attempt is always made.
pub async fn retry_until_ready<T, E, F, Fut>(
    mut check: F,
    attempts: u32,
    delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match check().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                tracing::warn!(attempt, attempts, error = %e, "Database not ready yet, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Connect and ping the database, retrying until it is available.
///
/// Used at startup when the database container may still be booting.
pub async fn wait_for_db(
    database_url: &str,
    attempts: u32,
    delay: Duration,
) -> Result<DbPool, sqlx::Error> {
    tracing::info!("Waiting for database");
    let pool = retry_until_ready(
        || async {
            let pool = create_pool(database_url).await?;
            health_check(&pool).await?;
            Ok::<_, sqlx::Error>(pool)
        },
        attempts,
        delay,
    )
    .await?;
    tracing::info!("Database available");
    Ok(pool)
}
