//! Zone persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `zones` and
//! `zone_regions` tables. The `countries` column stores a JSON array of
//! alpha-2 codes as text; reading tolerates the legacy single-value form
//! (see [`crate::db::migrate`]).

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use geozones_core::{CountryCode, Zone};

/// Insert a new zone record with its region associations.
pub async fn insert(pool: &PgPool, zone: &Zone) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO zones (id, site_id, name, countries, all_regions, enabled,
         created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(zone.id)
    .bind(zone.site_id)
    .bind(&zone.name)
    .bind(countries_to_json(zone))
    .bind(zone.all_regions)
    .bind(zone.enabled)
    .bind(zone.created_at)
    .bind(zone.updated_at)
    .execute(&mut *tx)
    .await?;

    for code in &zone.regions {
        sqlx::query("INSERT INTO zone_regions (zone_id, region_code) VALUES ($1, $2)")
            .bind(zone.id)
            .bind(code)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Replace a zone row and its region associations.
pub async fn update(pool: &PgPool, zone: &Zone) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE zones SET site_id = $1, name = $2, countries = $3, all_regions = $4,
         enabled = $5, updated_at = $6 WHERE id = $7",
    )
    .bind(zone.site_id)
    .bind(&zone.name)
    .bind(countries_to_json(zone))
    .bind(zone.all_regions)
    .bind(zone.enabled)
    .bind(zone.updated_at)
    .bind(zone.id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM zone_regions WHERE zone_id = $1")
        .bind(zone.id)
        .execute(&mut *tx)
        .await?;
    for code in &zone.regions {
        sqlx::query("INSERT INTO zone_regions (zone_id, region_code) VALUES ($1, $2)")
            .bind(zone.id)
            .bind(code)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a zone. Association rows cascade.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM zones WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Add one region association.
pub async fn add_region(pool: &PgPool, id: Uuid, code: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO zone_regions (zone_id, region_code) VALUES ($1, $2)
         ON CONFLICT DO NOTHING",
    )
    .bind(id)
    .bind(code)
    .execute(pool)
    .await?;
    Ok(())
}

/// Remove one region association.
pub async fn remove_region(pool: &PgPool, id: Uuid, code: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM zone_regions WHERE zone_id = $1 AND region_code = $2")
        .bind(id)
        .bind(code)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Load all zones and their associations into memory on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Zone>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ZoneRow>(
        "SELECT id, site_id, name, countries, all_regions, enabled, created_at, updated_at
         FROM zones ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    let associations = sqlx::query_as::<_, ZoneRegionRow>(
        "SELECT zone_id, region_code FROM zone_regions ORDER BY region_code",
    )
    .fetch_all(pool)
    .await?;

    let mut zones = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id;
        match row.into_zone() {
            Some(mut zone) => {
                zone.regions = associations
                    .iter()
                    .filter(|a| a.zone_id == zone.id)
                    .map(|a| a.region_code.clone())
                    .collect();
                zones.push(zone);
            }
            None => {
                // into_zone() already logs the offending field.
                tracing::error!(zone_id = %id, "skipping zone row with invalid countries during load_all");
            }
        }
    }
    Ok(zones)
}

fn countries_to_json(zone: &Zone) -> String {
    let codes: Vec<&str> = zone.countries.iter().map(CountryCode::as_str).collect();
    // Serializing a Vec<&str> cannot fail.
    serde_json::to_string(&codes).unwrap_or_else(|_| "[]".to_string())
}

/// Parse a stored countries column value.
///
/// Accepts the JSON-array form; a non-array value is treated as one legacy
/// single-valued entry, the same fallback the original zone model applied
/// before its rows were migrated.
fn parse_countries(raw: &str) -> Result<Vec<CountryCode>, String> {
    let trimmed = raw.trim();
    let values: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed).map_err(|e| format!("invalid countries JSON: {e}"))?
    } else if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![trimmed.to_string()]
    };

    values
        .iter()
        .map(|v| CountryCode::new(v).map_err(|e| e.to_string()))
        .collect()
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct ZoneRow {
    id: Uuid,
    site_id: Uuid,
    name: String,
    countries: String,
    all_regions: bool,
    enabled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ZoneRegionRow {
    zone_id: Uuid,
    region_code: String,
}

impl ZoneRow {
    fn into_zone(self) -> Option<Zone> {
        let countries = match parse_countries(&self.countries) {
            Ok(codes) => codes,
            Err(reason) => {
                tracing::warn!(
                    id = %self.id,
                    countries = %self.countries,
                    %reason,
                    "skipping zone row with unparseable countries column"
                );
                return None;
            }
        };
        Some(Zone {
            id: self.id,
            site_id: self.site_id,
            name: self.name,
            countries,
            all_regions: self.all_regions,
            enabled: self.enabled,
            regions: Vec::new(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_countries_array_form() {
        let codes = parse_countries("[\"GB\",\"US\"]").unwrap();
        assert_eq!(codes.len(), 2);
        assert_eq!(codes[0].as_str(), "GB");
    }

    #[test]
    fn parse_countries_legacy_single_value() {
        let codes = parse_countries("GB").unwrap();
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].as_str(), "GB");
    }

    #[test]
    fn parse_countries_empty() {
        assert!(parse_countries("").unwrap().is_empty());
        assert!(parse_countries("[]").unwrap().is_empty());
    }

    #[test]
    fn parse_countries_rejects_garbage() {
        assert!(parse_countries("[\"GB\"").is_err());
        assert!(parse_countries("[\"GBX\"]").is_err());
    }
}
