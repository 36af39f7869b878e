//! # Application State
//!
//! Shared state handed to every handler: the immutable region catalog, the
//! in-memory zone store, and the optional Postgres pool. The in-memory store
//! is authoritative for reads; writes go through to the database when a pool
//! is configured and are reloaded on startup.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use sqlx::PgPool;
use uuid::Uuid;

use geozones_core::{RegionCatalog, Zone};

/// Thread-safe in-memory zone store.
#[derive(Debug, Clone, Default)]
pub struct ZoneStore {
    inner: Arc<RwLock<HashMap<Uuid, Zone>>>,
}

impl ZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: Uuid, zone: Zone) {
        self.inner.write().insert(id, zone);
    }

    pub fn get(&self, id: &Uuid) -> Option<Zone> {
        self.inner.read().get(id).cloned()
    }

    pub fn remove(&self, id: &Uuid) -> Option<Zone> {
        self.inner.write().remove(id)
    }

    /// All zones, oldest first. Ties break on id for a stable order.
    pub fn list(&self) -> Vec<Zone> {
        let mut zones: Vec<Zone> = self.inner.read().values().cloned().collect();
        zones.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        zones
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// Shared application state. Cloning is cheap: all fields are handles.
#[derive(Clone)]
pub struct AppState {
    /// The immutable ISO-3166 reference catalog, loaded once at startup.
    pub catalog: Arc<RegionCatalog>,
    pub zones: ZoneStore,
    /// Present when `DATABASE_URL` is configured.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// In-memory-only state (development and tests).
    pub fn new(catalog: Arc<RegionCatalog>) -> Self {
        Self {
            catalog,
            zones: ZoneStore::new(),
            db_pool: None,
        }
    }

    /// State with an optional database pool for write-through persistence.
    pub fn with_pool(catalog: Arc<RegionCatalog>, db_pool: Option<PgPool>) -> Self {
        Self {
            catalog,
            zones: ZoneStore::new(),
            db_pool,
        }
    }
}
