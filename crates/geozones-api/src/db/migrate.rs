//! Legacy country-column batch migration.
//!
//! Walks every row of the `zones` table and rewrites the `countries` column
//! between the legacy single-value form and the JSON-array form, using the
//! per-value helpers from [`geozones_core::legacy`]. Per-row failures are
//! logged and counted; the batch never aborts part-way.

use sqlx::PgPool;
use uuid::Uuid;

use geozones_core::legacy::{downgrade_country_field, upgrade_country_field, MigrationOutcome};

/// Which way to rewrite the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Legacy single value → JSON array.
    Up,
    /// JSON array → first element as a single value.
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Run the batch migration over every zone row.
///
/// With `dry_run` set, rows are examined and counted but never written.
pub async fn run(
    pool: &PgPool,
    direction: Direction,
    dry_run: bool,
) -> Result<MigrationOutcome, sqlx::Error> {
    let rows: Vec<(Uuid, String)> = sqlx::query_as("SELECT id, countries FROM zones ORDER BY created_at")
        .fetch_all(pool)
        .await?;

    let mut outcome = MigrationOutcome::default();
    for (id, countries) in rows {
        let replacement = match direction {
            Direction::Up => upgrade_country_field(&countries),
            Direction::Down => downgrade_country_field(&countries),
        };

        let Some(replacement) = replacement else {
            outcome.skipped += 1;
            continue;
        };

        if dry_run {
            tracing::info!(zone_id = %id, from = %countries, to = %replacement,
                "dry run: would rewrite countries column");
            outcome.changed += 1;
            continue;
        }

        let result = sqlx::query("UPDATE zones SET countries = $1 WHERE id = $2")
            .bind(&replacement)
            .bind(id)
            .execute(pool)
            .await;
        match result {
            Ok(_) => {
                tracing::debug!(zone_id = %id, "countries column rewritten");
                outcome.changed += 1;
            }
            Err(e) => {
                tracing::error!(zone_id = %id, error = %e, "failed to rewrite countries column");
                outcome.failed += 1;
            }
        }
    }

    tracing::info!(
        direction = direction.as_str(),
        dry_run,
        changed = outcome.changed,
        skipped = outcome.skipped,
        failed = outcome.failed,
        "legacy country-column migration finished"
    );
    Ok(outcome)
}
