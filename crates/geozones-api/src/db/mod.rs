//! # Database Persistence Layer
//!
//! Provides Postgres persistence for zone state via SQLx.
//!
//! ## Architecture
//!
//! The database layer is **optional**. When `DATABASE_URL` is set, the API
//! persists zones and their region associations to PostgreSQL and mirrors
//! the reference catalog into the `regions` table. When absent, the API
//! operates in in-memory-only mode (suitable for development and testing).
//!
//! ## Tables
//!
//! - `regions` — read-only mirror of the bundled ISO 3166-2 catalog, synced
//!   at startup by [`regions::sync_reference_data`].
//! - `zones` — zone records; the `countries` column holds a JSON array of
//!   alpha-2 codes as text (see [`migrate`] for the legacy single-value form).
//! - `zone_regions` — zone↔region association rows.

pub mod migrate;
pub mod regions;
pub mod zones;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if `DATABASE_URL` is not set (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set — running in-memory only mode. \
                 Zones will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    // Run embedded migrations.
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}
