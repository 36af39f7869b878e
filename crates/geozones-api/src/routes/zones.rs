//! # Zone API
//!
//! Zone CRUD plus the zone↔region association endpoints. Country codes on
//! every write are validated against the catalog before any state changes,
//! and auto-population runs on create and update when `all_regions` is set.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use geozones_core::{CountryCode, InvalidCodeError, RegionRecord, Zone};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Request body shared by zone create and update (full replacement).
#[derive(Debug, Deserialize)]
pub struct ZonePayload {
    pub site_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub all_regions: bool,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Validate for ZonePayload {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.name.len() > 255 {
            return Err("name must not exceed 255 characters".to_string());
        }
        if self.countries.len() > 249 {
            return Err("countries must not exceed the ISO 3166-1 table size".to_string());
        }
        Ok(())
    }
}

/// Build the zones router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/zones", get(list_zones).post(create_zone))
        .route(
            "/v1/zones/:id",
            get(get_zone).put(update_zone).delete(delete_zone),
        )
        .route("/v1/zones/:id/regions", get(list_zone_regions))
        .route(
            "/v1/zones/:id/regions/:code",
            put(add_zone_region).delete(remove_zone_region),
        )
}

/// Validate every country code (shape and table membership) before use.
fn validate_countries(state: &AppState, raw: &[String]) -> Result<Vec<CountryCode>, AppError> {
    let mut codes = Vec::with_capacity(raw.len());
    for value in raw {
        let code = CountryCode::new(value)?;
        if !state.catalog.contains_country(&code) {
            return Err(InvalidCodeError::UnknownCountry(code.to_string()).into());
        }
        codes.push(code);
    }
    Ok(codes)
}

/// POST /v1/zones — Create a zone.
async fn create_zone(
    State(state): State<AppState>,
    body: Result<Json<ZonePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Zone>), AppError> {
    let req = extract_validated_json(body)?;
    let countries = validate_countries(&state, &req.countries)?;

    let mut zone = Zone::new(req.site_id, req.name, countries);
    zone.all_regions = req.all_regions;
    zone.enabled = req.enabled;
    zone.auto_populate(&state.catalog);

    state.zones.insert(zone.id, zone.clone());

    // Persist to database (write-through). Failure is surfaced to the client
    // because the in-memory record would be lost on restart.
    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::zones::insert(pool, &zone).await {
            tracing::error!(zone_id = %zone.id, error = %e, "failed to persist zone to database");
            return Err(AppError::Internal(
                "zone recorded in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok((StatusCode::CREATED, Json(zone)))
}

/// GET /v1/zones — List zones, oldest first.
async fn list_zones(State(state): State<AppState>) -> Json<Vec<Zone>> {
    Json(state.zones.list())
}

/// GET /v1/zones/:id — Fetch one zone.
async fn get_zone(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Zone>, AppError> {
    let zone = state
        .zones
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("zone {id} not found")))?;
    Ok(Json(zone))
}

/// PUT /v1/zones/:id — Replace a zone's fields.
async fn update_zone(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<ZonePayload>, JsonRejection>,
) -> Result<Json<Zone>, AppError> {
    let req = extract_validated_json(body)?;
    let countries = validate_countries(&state, &req.countries)?;

    let mut zone = state
        .zones
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("zone {id} not found")))?;

    zone.site_id = req.site_id;
    zone.name = req.name;
    zone.set_countries(countries);
    zone.all_regions = req.all_regions;
    zone.enabled = req.enabled;
    zone.updated_at = Utc::now();
    zone.auto_populate(&state.catalog);

    state.zones.insert(id, zone.clone());

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::zones::update(pool, &zone).await {
            tracing::error!(zone_id = %id, error = %e, "failed to persist zone update to database");
            return Err(AppError::Internal(
                "zone updated in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok(Json(zone))
}

/// DELETE /v1/zones/:id — Remove a zone and its region associations.
async fn delete_zone(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .zones
        .remove(&id)
        .ok_or_else(|| AppError::not_found(format!("zone {id} not found")))?;

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::zones::delete(pool, id).await {
            tracing::error!(zone_id = %id, error = %e, "failed to delete zone from database");
            return Err(AppError::Internal(
                "zone removed in-memory but database delete failed".to_string(),
            ));
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/zones/:id/regions — Resolve the zone's region associations.
async fn list_zone_regions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RegionRecord>>, AppError> {
    let zone = state
        .zones
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("zone {id} not found")))?;

    let records = zone
        .resolve_regions(&state.catalog)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(records))
}

/// PUT /v1/zones/:id/regions/:code — Associate a region. Idempotent.
async fn add_zone_region(
    State(state): State<AppState>,
    Path((id, code)): Path<(Uuid, String)>,
) -> Result<Json<Zone>, AppError> {
    let record = state
        .catalog
        .region(&code)
        .ok_or_else(|| AppError::Validation(format!("unknown region code {code:?}")))?;

    let mut zone = state
        .zones
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("zone {id} not found")))?;

    if zone.add_region(&record.code) {
        zone.updated_at = Utc::now();
        state.zones.insert(id, zone.clone());

        if let Some(pool) = &state.db_pool {
            if let Err(e) = crate::db::zones::add_region(pool, id, &record.code).await {
                tracing::error!(zone_id = %id, region = %record.code, error = %e,
                    "failed to persist region association");
                return Err(AppError::Internal(
                    "association recorded in-memory but database persist failed".to_string(),
                ));
            }
        }
    }

    Ok(Json(zone))
}

/// DELETE /v1/zones/:id/regions/:code — Remove a region association.
async fn remove_zone_region(
    State(state): State<AppState>,
    Path((id, code)): Path<(Uuid, String)>,
) -> Result<StatusCode, AppError> {
    let mut zone = state
        .zones
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("zone {id} not found")))?;

    if !zone.remove_region(&code) {
        return Err(AppError::not_found(format!(
            "zone {id} has no region {code}"
        )));
    }

    zone.updated_at = Utc::now();
    state.zones.insert(id, zone.clone());

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::zones::remove_region(pool, id, &code).await {
            tracing::error!(zone_id = %id, region = %code, error = %e,
                "failed to persist region removal");
            return Err(AppError::Internal(
                "association removed in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok(StatusCode::NO_CONTENT)
}
