//! # geozones-api entry point
//!
//! Loads the reference catalog, connects to Postgres when configured,
//! syncs the reference table, reloads persisted zones, and serves the
//! Axum application.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use geozones_api::state::AppState;
use geozones_api::{app, db};
use geozones_core::RegionCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    let catalog = Arc::new(RegionCatalog::load()?);
    tracing::info!(
        regions = catalog.len(),
        countries = catalog.country_count(),
        "reference catalog loaded"
    );

    let pool = db::init_pool().await?;
    let state = AppState::with_pool(Arc::clone(&catalog), pool);

    if let Some(pool) = &state.db_pool {
        db::regions::sync_reference_data(pool, &catalog).await?;

        let zones = db::zones::load_all(pool).await?;
        let count = zones.len();
        for zone in zones {
            state.zones.insert(zone.id, zone);
        }
        tracing::info!(zones = count, "persisted zones reloaded");
    }

    let bind = std::env::var("GEOZONES_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(%bind, "geozones-api listening");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
