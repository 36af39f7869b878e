//! # Region Lookup API
//!
//! Read-only catalog endpoints: the per-country `region_code → name` map
//! backing client-side dropdowns, a filtered record listing, and the ISO
//! 3166-1 country table.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use geozones_core::{CountryCode, InvalidCodeError, RegionFilter, RegionRecord};

use crate::error::AppError;
use crate::state::AppState;

/// Query parameters for the filtered region listing.
#[derive(Debug, Deserialize, Default)]
pub struct RegionsQuery {
    /// Comma-separated ISO 3166-1 alpha-2 codes, e.g. `GB,US`.
    pub countries: Option<String>,
    /// Comma-separated ISO 3166-2 suffixes, e.g. `AL,AR`.
    pub codes: Option<String>,
}

/// Build the region lookup router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/regions", get(list_regions))
        .route("/v1/regions/:country", get(country_region_map))
        .route("/v1/countries", get(list_countries))
}

/// GET /v1/regions/:country — `region_code → name` map for one country.
///
/// Countries without subdivisions in the reference data yield a single
/// pseudo-entry keyed by the country code, so a dropdown always has at
/// least one option to offer.
async fn country_region_map(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<BTreeMap<String, String>>, AppError> {
    let code = CountryCode::new(&country)?;
    let name = state
        .catalog
        .country_name(&code)
        .ok_or_else(|| InvalidCodeError::UnknownCountry(code.to_string()))?
        .to_string();

    let map: BTreeMap<String, String> = state
        .catalog
        .regions_for_country(&code)
        .map(|r| (r.region_code.to_string(), r.name.clone()))
        .collect();

    if map.is_empty() {
        // No subdivisions (e.g. "AQ"): the whole nation is the only option.
        let mut fallback = BTreeMap::new();
        fallback.insert(code.to_string(), name);
        return Ok(Json(fallback));
    }

    Ok(Json(map))
}

/// GET /v1/regions?countries=GB,US&codes=AL,AR — filtered record listing.
async fn list_regions(
    State(state): State<AppState>,
    Query(query): Query<RegionsQuery>,
) -> Result<Json<Vec<RegionRecord>>, AppError> {
    let mut filter = RegionFilter::new(Arc::clone(&state.catalog));
    if let Some(countries) = &query.countries {
        filter.set_countries(split_csv(countries))?;
    }
    if let Some(codes) = &query.codes {
        filter.set_region_codes(split_csv(codes))?;
    }
    Ok(Json(filter.regions().to_vec()))
}

/// GET /v1/countries — ISO 3166-1 `code → name` map.
async fn list_countries(State(state): State<AppState>) -> Json<BTreeMap<String, String>> {
    let map = state
        .catalog
        .countries()
        .iter()
        .map(|c| (c.code.to_string(), c.name.clone()))
        .collect();
    Json(map)
}

fn split_csv(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}
