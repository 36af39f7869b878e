//! # Region Filtering
//!
//! [`RegionFilter`] slices the [`RegionCatalog`] by country codes and/or
//! region-code suffixes. Results are cached until the caller explicitly
//! invalidates them — mutating the filter does **not** drop the cache, so
//! callers that change the country or region sets must call
//! [`RegionFilter::invalidate`] before re-querying.
//!
//! The filter is a cheap, request-scoped value object. Build one per
//! request/operation rather than sharing a single instance across threads.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::{RegionCatalog, RegionRecord};
use crate::codes::{CountryCode, RegionCode};
use crate::error::InvalidCodeError;

/// A cached, parameterized view over the subdivision catalog.
///
/// A record passes the filter when (the country set is empty OR the record's
/// country is in it) AND (the region-code set is empty OR the record's
/// suffix is in it). Result order matches catalog order.
#[derive(Debug, Clone)]
pub struct RegionFilter {
    catalog: Arc<RegionCatalog>,
    countries: Vec<CountryCode>,
    region_codes: Vec<RegionCode>,
    cache: Option<Vec<RegionRecord>>,
}

impl RegionFilter {
    /// Create an unconstrained filter over the given catalog.
    pub fn new(catalog: Arc<RegionCatalog>) -> Self {
        Self {
            catalog,
            countries: Vec::new(),
            region_codes: Vec::new(),
            cache: None,
        }
    }

    /// Create a filter constrained to the given countries.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCodeError`] if any code fails shape or ISO 3166-1
    /// membership validation.
    pub fn with_countries<I, S>(
        catalog: Arc<RegionCatalog>,
        countries: I,
    ) -> Result<Self, InvalidCodeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::new(catalog);
        filter.set_countries(countries)?;
        Ok(filter)
    }

    /// The current country constraint, in insertion order.
    pub fn countries(&self) -> &[CountryCode] {
        &self.countries
    }

    /// The current region-code constraint, in insertion order.
    pub fn region_codes(&self) -> &[RegionCode] {
        &self.region_codes
    }

    /// Replace the country constraint.
    ///
    /// Validates every code before any state changes; on error the previous
    /// constraint is left untouched. Duplicates are dropped, order is kept.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCodeError`] for the first code failing shape or
    /// ISO 3166-1 membership validation.
    pub fn set_countries<I, S>(&mut self, countries: I) -> Result<&mut Self, InvalidCodeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut validated = Vec::new();
        for raw in countries {
            let code = self.validate_country(raw.as_ref())?;
            if !validated.contains(&code) {
                validated.push(code);
            }
        }
        self.countries = validated;
        Ok(self)
    }

    /// Add one country to the constraint. No-op if already present.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCodeError`] if the code fails shape or membership
    /// validation; the constraint is unchanged on error.
    pub fn add_country(&mut self, country: &str) -> Result<&mut Self, InvalidCodeError> {
        let code = self.validate_country(country)?;
        if !self.countries.contains(&code) {
            self.countries.push(code);
        }
        Ok(self)
    }

    /// Remove one country from the constraint.
    ///
    /// The code is validated even when absent from the constraint, matching
    /// the add/set calls.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCodeError`] if the code fails shape or membership
    /// validation.
    pub fn remove_country(&mut self, country: &str) -> Result<&mut Self, InvalidCodeError> {
        let code = self.validate_country(country)?;
        self.countries.retain(|c| *c != code);
        Ok(self)
    }

    /// Replace the region-code constraint.
    ///
    /// Region suffixes are shape-validated only; the suffix namespace is
    /// per-country, so table membership is not meaningful here.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCodeError::RegionShape`] for the first malformed
    /// code; the previous constraint is left untouched on error.
    pub fn set_region_codes<I, S>(&mut self, codes: I) -> Result<&mut Self, InvalidCodeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut validated = Vec::new();
        for raw in codes {
            let code = RegionCode::new(raw.as_ref())?;
            if !validated.contains(&code) {
                validated.push(code);
            }
        }
        self.region_codes = validated;
        Ok(self)
    }

    /// Drop the cached result. Chainable: `filter.invalidate().regions()`.
    pub fn invalidate(&mut self) -> &mut Self {
        self.cache = None;
        self
    }

    /// The matching records, in catalog order.
    ///
    /// The first call computes and caches the result; later calls return the
    /// cache even if the constraints have changed since. Call
    /// [`invalidate`](Self::invalidate) after mutating to recompute.
    pub fn regions(&mut self) -> &[RegionRecord] {
        if self.cache.is_none() {
            let matched = self
                .catalog
                .regions()
                .iter()
                .filter(|r| self.matches(r))
                .cloned()
                .collect();
            self.cache = Some(matched);
        }
        self.cache.as_deref().unwrap_or_default()
    }

    /// The matching records as a `region_code → name` map, for dropdown
    /// sources. Meaningful for single-country constraints; with several
    /// countries, colliding suffixes keep the last record.
    pub fn region_map(&mut self) -> BTreeMap<String, String> {
        self.regions()
            .iter()
            .map(|r| (r.region_code.to_string(), r.name.clone()))
            .collect()
    }

    fn matches(&self, record: &RegionRecord) -> bool {
        (self.countries.is_empty() || self.countries.contains(&record.country_code))
            && (self.region_codes.is_empty() || self.region_codes.contains(&record.region_code))
    }

    fn validate_country(&self, raw: &str) -> Result<CountryCode, InvalidCodeError> {
        let code = CountryCode::new(raw)?;
        if !self.catalog.contains_country(&code) {
            return Err(InvalidCodeError::UnknownCountry(code.to_string()));
        }
        Ok(code)
    }
}
