//! # geozones-api — Axum API Service for GeoZones
//!
//! HTTP surface over the geozones-core catalog and zone domain: region
//! lookups for client-side dropdowns, zone CRUD, zone↔region association
//! management, and health probes. Zone state lives in an in-memory store
//! with optional write-through Postgres persistence.
//!
//! ## API Surface
//!
//! | Prefix                        | Module               | Domain              |
//! |-------------------------------|----------------------|---------------------|
//! | `/v1/regions/*`               | [`routes::regions`]  | Catalog lookups     |
//! | `/v1/countries`               | [`routes::regions`]  | ISO 3166-1 table    |
//! | `/v1/zones/*`                 | [`routes::zones`]    | Zone CRUD           |
//! | `/v1/zones/*/regions/*`       | [`routes::zones`]    | Region associations |
//! | `/health/*`                   | this module          | Probes              |

pub mod db;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::regions::router())
        .merge(routes::zones::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .with_state(state);

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the application is ready to serve traffic.
///
/// Checks:
/// - The reference catalog is populated.
/// - The in-memory zone store is accessible.
/// - Database connection is healthy (when configured).
///
/// Returns 200 "ready" or 503 with a diagnostic message.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if state.catalog.is_empty() {
        return (StatusCode::SERVICE_UNAVAILABLE, "catalog empty").into_response();
    }

    // Verify the store is accessible (read lock acquirable).
    let _ = state.zones.len();

    // Verify database connection (when configured).
    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!("Database health check failed: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
        }
    }

    (StatusCode::OK, "ready").into_response()
}
