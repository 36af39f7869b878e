//! HTTP route modules, one per resource.

pub mod regions;
pub mod zones;
