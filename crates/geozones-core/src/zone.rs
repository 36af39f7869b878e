//! # Zone Records
//!
//! A zone is an admin-defined grouping of countries and subdivisions,
//! owned by a site configuration. Zones are persisted by the API crate;
//! this module holds the domain record and the auto-population rule that
//! runs on save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{RegionCatalog, RegionRecord};
use crate::codes::CountryCode;

/// An admin-defined grouping of countries and their subdivisions.
///
/// `regions` holds full ISO 3166-2 codes ("GB-BFS") — the 1-3 character
/// suffix alone is not unique across countries. The set is maintained
/// either manually through the association endpoints or wholesale by
/// [`Zone::auto_populate`] when `all_regions` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: Uuid,
    /// The owning site configuration.
    pub site_id: Uuid,
    pub name: String,
    /// Member countries, in selection order, de-duplicated.
    pub countries: Vec<CountryCode>,
    /// When set, saving the zone replaces `regions` with every catalog
    /// subdivision of the member countries.
    pub all_regions: bool,
    pub enabled: bool,
    /// Full ISO 3166-2 codes of the associated subdivisions.
    pub regions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Zone {
    /// Create a new, enabled zone with no region associations.
    pub fn new(site_id: Uuid, name: impl Into<String>, countries: Vec<CountryCode>) -> Self {
        let now = Utc::now();
        let mut zone = Self {
            id: Uuid::new_v4(),
            site_id,
            name: name.into(),
            countries: Vec::new(),
            all_regions: false,
            enabled: true,
            regions: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        zone.set_countries(countries);
        zone
    }

    /// Replace the member countries, dropping duplicates and keeping order.
    pub fn set_countries(&mut self, countries: Vec<CountryCode>) {
        self.countries.clear();
        for code in countries {
            if !self.countries.contains(&code) {
                self.countries.push(code);
            }
        }
    }

    /// Comma-separated country list for summary display.
    pub fn countries_list(&self) -> String {
        self.countries
            .iter()
            .map(CountryCode::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// When `all_regions` is set, replace the region associations with
    /// every catalog subdivision of the member countries.
    ///
    /// The replacement is wholesale, so re-running with the same countries
    /// yields the same set — no duplicate associations accumulate.
    pub fn auto_populate(&mut self, catalog: &RegionCatalog) {
        if !self.all_regions {
            return;
        }
        self.regions = catalog
            .regions()
            .iter()
            .filter(|r| self.countries.contains(&r.country_code))
            .map(|r| r.code.clone())
            .collect();
    }

    /// Associate one subdivision by full code. Returns whether the set changed.
    pub fn add_region(&mut self, code: &str) -> bool {
        if self.regions.iter().any(|c| c == code) {
            return false;
        }
        self.regions.push(code.to_string());
        true
    }

    /// Remove one subdivision association. Returns whether the set changed.
    pub fn remove_region(&mut self, code: &str) -> bool {
        let before = self.regions.len();
        self.regions.retain(|c| c != code);
        self.regions.len() != before
    }

    /// Resolve the associated region codes against the catalog.
    ///
    /// Codes that have left the reference data are silently dropped, the
    /// same way the original reference table treated orphaned associations.
    pub fn resolve_regions<'a>(&self, catalog: &'a RegionCatalog) -> Vec<&'a RegionRecord> {
        self.regions
            .iter()
            .filter_map(|code| catalog.region(code))
            .collect()
    }

    /// Number of associated regions resolvable in the catalog.
    pub fn region_count(&self, catalog: &RegionCatalog) -> usize {
        self.resolve_regions(catalog).len()
    }
}
