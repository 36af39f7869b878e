//! # geozones-core — Foundational Types for GeoZones
//!
//! This crate is the bedrock of the GeoZones workspace. It defines the
//! ISO-3166 domain types and the in-process reference catalog that every
//! other crate builds on; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for ISO codes.** [`CountryCode`] and [`RegionCode`]
//!    are validated at construction time — no bare strings for identifiers,
//!    and deserialization runs the same validation as the constructors.
//!
//! 2. **Explicit catalog, no ambient globals.** [`RegionCatalog`] is built
//!    once from the bundled iso-codes data at process start and passed by
//!    reference (usually `Arc`) to consumers.
//!
//! 3. **Explicit cache invalidation.** [`RegionFilter`] caches its result
//!    until the caller invalidates it; mutating the filter never silently
//!    drops the cache.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `geozones-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`.

pub mod catalog;
pub mod codes;
pub mod error;
pub mod filter;
pub mod legacy;
pub mod zone;

// Re-export primary types for ergonomic imports.
pub use catalog::{Country, RegionCatalog, RegionRecord};
pub use codes::{CountryCode, RegionCode};
pub use error::{CatalogError, InvalidCodeError};
pub use filter::RegionFilter;
pub use legacy::MigrationOutcome;
pub use zone::Zone;
