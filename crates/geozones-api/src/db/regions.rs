//! Reference catalog persistence.
//!
//! The `regions` table mirrors the bundled catalog so reporting queries can
//! join against it. It is synced (upserted) at startup and never written by
//! request handlers.

use sqlx::PgPool;

use geozones_core::RegionCatalog;

/// Upsert the full catalog into the `regions` table.
///
/// Runs in one transaction; a partial sync is never visible. Rows for codes
/// that have left the reference data are kept, matching the original
/// behavior of never deleting reference rows.
pub async fn sync_reference_data(
    pool: &PgPool,
    catalog: &RegionCatalog,
) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let mut upserted = 0u64;
    for record in catalog.regions() {
        sqlx::query(
            "INSERT INTO regions (code, name, kind, region_code, country_code)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (code) DO UPDATE
             SET name = EXCLUDED.name, kind = EXCLUDED.kind",
        )
        .bind(&record.code)
        .bind(&record.name)
        .bind(&record.kind)
        .bind(record.region_code.as_str())
        .bind(record.country_code.as_str())
        .execute(&mut *tx)
        .await?;
        upserted += 1;
    }

    tx.commit().await?;
    tracing::info!(rows = upserted, "reference region data synced");
    Ok(upserted)
}
