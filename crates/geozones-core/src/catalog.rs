//! # ISO-3166 Reference Catalog
//!
//! The read-only, in-process catalog of ISO 3166-1 countries and ISO 3166-2
//! subdivisions. The data files are the debian iso-codes JSON exports,
//! embedded at compile time and parsed once when the catalog is constructed.
//!
//! Construct the catalog at process start with [`RegionCatalog::load`] and
//! share it by reference (`Arc<RegionCatalog>`); it is never mutated at
//! runtime, so concurrent readers need no synchronization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::codes::{CountryCode, RegionCode};
use crate::error::CatalogError;

const SUBDIVISION_DATA: &str = include_str!("../data/iso_3166-2.json");
const COUNTRY_DATA: &str = include_str!("../data/iso_3166-1.json");

/// A single ISO 3166-2 subdivision, identified by its full `code`.
///
/// `code` always decomposes as `country_code "-" region_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionRecord {
    /// Subdivision name, e.g. "Armagh City, Banbridge and Craigavon".
    pub name: String,
    /// Subdivision type, e.g. "State", "Province", "District".
    #[serde(rename = "type")]
    pub kind: String,
    /// Full ISO 3166-2 code, e.g. "GB-ABC".
    pub code: String,
    /// The 1-3 character suffix, e.g. "ABC".
    pub region_code: RegionCode,
    /// The owning country's ISO 3166-1 alpha-2 code, e.g. "GB".
    pub country_code: CountryCode,
}

/// An ISO 3166-1 country entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    /// Alpha-2 code, e.g. "GB".
    pub code: CountryCode,
    /// Short country name, e.g. "United Kingdom".
    pub name: String,
}

/// Raw subdivision entry as it appears in the iso-codes export.
/// Entries may carry a `parent` field which we do not model.
#[derive(Debug, Deserialize)]
struct SubdivisionRaw {
    code: String,
    name: String,
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct SubdivisionFile {
    #[serde(rename = "3166-2")]
    entries: Vec<SubdivisionRaw>,
}

#[derive(Debug, Deserialize)]
struct CountryRaw {
    alpha_2: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CountryFile {
    #[serde(rename = "3166-1")]
    entries: Vec<CountryRaw>,
}

/// The immutable reference catalog.
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    regions: Vec<RegionRecord>,
    countries: Vec<Country>,
    /// Full ISO 3166-2 code → index into `regions`.
    region_index: HashMap<String, usize>,
    /// Alpha-2 code → index into `countries`.
    country_index: HashMap<CountryCode, usize>,
}

impl RegionCatalog {
    /// Parse the embedded reference data into a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the embedded JSON is malformed or a
    /// subdivision code does not decompose as `country "-" region`. Both
    /// indicate a defective bundled data revision.
    pub fn load() -> Result<Self, CatalogError> {
        let subdivisions: SubdivisionFile = serde_json::from_str(SUBDIVISION_DATA)?;
        let countries_file: CountryFile = serde_json::from_str(COUNTRY_DATA)?;

        let mut regions = Vec::with_capacity(subdivisions.entries.len());
        let mut region_index = HashMap::with_capacity(subdivisions.entries.len());
        for entry in subdivisions.entries {
            let (prefix, suffix) =
                entry
                    .code
                    .split_once('-')
                    .ok_or_else(|| CatalogError::MalformedCode {
                        code: entry.code.clone(),
                    })?;
            let country_code =
                CountryCode::new(prefix).map_err(|_| CatalogError::MalformedCode {
                    code: entry.code.clone(),
                })?;
            let region_code = RegionCode::new(suffix).map_err(|_| CatalogError::MalformedCode {
                code: entry.code.clone(),
            })?;

            region_index.insert(entry.code.clone(), regions.len());
            regions.push(RegionRecord {
                name: entry.name,
                kind: entry.kind,
                code: entry.code,
                region_code,
                country_code,
            });
        }

        let mut countries = Vec::with_capacity(countries_file.entries.len());
        let mut country_index = HashMap::with_capacity(countries_file.entries.len());
        for entry in countries_file.entries {
            let code = CountryCode::new(&entry.alpha_2).map_err(|_| CatalogError::MalformedCode {
                code: entry.alpha_2.clone(),
            })?;
            country_index.insert(code.clone(), countries.len());
            countries.push(Country {
                code,
                name: entry.name,
            });
        }

        Ok(Self {
            regions,
            countries,
            region_index,
            country_index,
        })
    }

    /// All subdivision records, in data-file order (sorted by full code).
    pub fn regions(&self) -> &[RegionRecord] {
        &self.regions
    }

    /// All ISO 3166-1 countries, in data-file order.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Number of subdivision records.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the catalog holds no subdivisions (never true for the
    /// bundled data; present for API completeness).
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of ISO 3166-1 countries.
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    /// Whether the code appears in the ISO 3166-1 table.
    pub fn contains_country(&self, code: &CountryCode) -> bool {
        self.country_index.contains_key(code)
    }

    /// Short name for a country code, if present in the table.
    pub fn country_name(&self, code: &CountryCode) -> Option<&str> {
        self.country_index
            .get(code)
            .map(|&i| self.countries[i].name.as_str())
    }

    /// Look up a subdivision by full ISO 3166-2 code (e.g. "GB-BFS").
    pub fn region(&self, code: &str) -> Option<&RegionRecord> {
        self.region_index.get(code).map(|&i| &self.regions[i])
    }

    /// All subdivisions of one country, in catalog order.
    pub fn regions_for_country<'a>(
        &'a self,
        country: &'a CountryCode,
    ) -> impl Iterator<Item = &'a RegionRecord> {
        self.regions.iter().filter(move |r| r.country_code == *country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> RegionCatalog {
        RegionCatalog::load().expect("bundled data parses")
    }

    #[test]
    fn loads_bundled_revision() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 5127);
        assert_eq!(catalog.country_count(), 249);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn regions_keep_data_order() {
        let catalog = catalog();
        let first = &catalog.regions()[0];
        assert_eq!(first.code, "AD-02");
        assert_eq!(first.name, "Canillo");
        assert_eq!(first.kind, "Parish");
        assert_eq!(first.country_code.as_str(), "AD");
        assert_eq!(first.region_code.as_str(), "02");
    }

    #[test]
    fn every_code_decomposes() {
        let catalog = catalog();
        for record in catalog.regions() {
            assert_eq!(
                record.code,
                format!("{}-{}", record.country_code, record.region_code)
            );
        }
    }

    #[test]
    fn country_lookup() {
        let catalog = catalog();
        let gb = CountryCode::new("GB").unwrap();
        assert!(catalog.contains_country(&gb));
        assert_eq!(catalog.country_name(&gb), Some("United Kingdom"));

        let xy = CountryCode::new("XY").unwrap();
        assert!(!catalog.contains_country(&xy));
        assert_eq!(catalog.country_name(&xy), None);
    }

    #[test]
    fn region_lookup_by_full_code() {
        let catalog = catalog();
        let alaska = catalog.region("US-AK").expect("US-AK exists");
        assert_eq!(alaska.name, "Alaska");
        assert_eq!(alaska.kind, "State");
        assert!(catalog.region("US-ZZZ").is_none());
    }

    #[test]
    fn regions_for_country_counts() {
        let catalog = catalog();
        let gb = CountryCode::new("GB").unwrap();
        assert_eq!(catalog.regions_for_country(&gb).count(), 220);

        let us = CountryCode::new("US").unwrap();
        assert_eq!(catalog.regions_for_country(&us).count(), 57);

        let nz = CountryCode::new("NZ").unwrap();
        let nz_regions: Vec<_> = catalog.regions_for_country(&nz).collect();
        assert_eq!(nz_regions.len(), 17);
        assert_eq!(nz_regions[0].name, "Auckland");
    }

    #[test]
    fn record_serializes_with_type_field() {
        let catalog = catalog();
        let record = catalog.region("US-AK").unwrap();
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["type"], "State");
        assert_eq!(json["region_code"], "AK");
        assert_eq!(json["country_code"], "US");
    }
}
