//! # ISO-3166 Code Newtypes
//!
//! Newtype wrappers for the two code namespaces GeoZones deals in: the
//! ISO 3166-1 alpha-2 country code ("GB") and the ISO 3166-2 subdivision
//! suffix ("BFS" in "GB-BFS"). Keeping them distinct at the type level
//! prevents a region suffix being passed where a country code is expected.
//!
//! ## Validation
//!
//! Both constructors normalize to uppercase and validate shape. Membership
//! in the ISO 3166-1 table is a catalog concern and is checked where a
//! catalog is in scope (see [`crate::filter::RegionFilter`]).

use serde::{Deserialize, Serialize};

use crate::error::InvalidCodeError;

/// A two-letter ISO 3166-1 alpha-2 country code, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CountryCode(String);

impl CountryCode {
    /// Create a country code from a string, normalizing to uppercase and
    /// validating the two-ASCII-letter shape.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCodeError::CountryShape`] if the input is not
    /// exactly two ASCII letters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, InvalidCodeError> {
        let raw = value.as_ref().trim();
        if raw.len() != 2 || !raw.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InvalidCodeError::CountryShape(raw.to_string()));
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    /// Access the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// The 1-3 character suffix of an ISO 3166-2 subdivision code, stored
/// uppercase. The suffix alone is not unique across countries; pair it
/// with a [`CountryCode`] (or use the full code) to identify a region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegionCode(String);

impl RegionCode {
    /// Create a region code suffix, normalizing to uppercase and validating
    /// the 1-3 ASCII alphanumeric shape.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCodeError::RegionShape`] if the input is empty,
    /// longer than three characters, or contains non-alphanumerics.
    pub fn new(value: impl AsRef<str>) -> Result<Self, InvalidCodeError> {
        let raw = value.as_ref().trim();
        if raw.is_empty() || raw.len() > 3 || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(InvalidCodeError::RegionShape(raw.to_string()));
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    /// Access the suffix as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for RegionCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_code_valid() {
        let code = CountryCode::new("GB").unwrap();
        assert_eq!(code.as_str(), "GB");
    }

    #[test]
    fn country_code_normalizes_case() {
        let code = CountryCode::new("gb").unwrap();
        assert_eq!(code.as_str(), "GB");
    }

    #[test]
    fn country_code_trims_whitespace() {
        let code = CountryCode::new(" us ").unwrap();
        assert_eq!(code.as_str(), "US");
    }

    #[test]
    fn country_code_rejects_three_letters() {
        assert_eq!(
            CountryCode::new("GBC"),
            Err(InvalidCodeError::CountryShape("GBC".to_string()))
        );
    }

    #[test]
    fn country_code_rejects_digits_and_empty() {
        assert!(CountryCode::new("G1").is_err());
        assert!(CountryCode::new("").is_err());
        assert!(CountryCode::new("G").is_err());
    }

    #[test]
    fn country_code_display() {
        let code = CountryCode::new("NZ").unwrap();
        assert_eq!(format!("{code}"), "NZ");
    }

    #[test]
    fn country_code_deserialize_validates() {
        let ok: CountryCode = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(ok.as_str(), "DE");
        let bad: Result<CountryCode, _> = serde_json::from_str("\"GBC\"");
        assert!(bad.is_err());
    }

    #[test]
    fn region_code_valid_lengths() {
        assert_eq!(RegionCode::new("2").unwrap().as_str(), "2");
        assert_eq!(RegionCode::new("ak").unwrap().as_str(), "AK");
        assert_eq!(RegionCode::new("BFS").unwrap().as_str(), "BFS");
    }

    #[test]
    fn region_code_rejects_bad_shapes() {
        assert!(RegionCode::new("").is_err());
        assert!(RegionCode::new("ABCD").is_err());
        assert!(RegionCode::new("A-B").is_err());
    }

    #[test]
    fn region_code_deserialize_validates() {
        let ok: RegionCode = serde_json::from_str("\"al\"").unwrap();
        assert_eq!(ok.as_str(), "AL");
        let bad: Result<RegionCode, _> = serde_json::from_str("\"TOOLONG\"");
        assert!(bad.is_err());
    }

    #[test]
    fn codes_serde_roundtrip() {
        let country = CountryCode::new("FR").unwrap();
        let json = serde_json::to_string(&country).unwrap();
        let back: CountryCode = serde_json::from_str(&json).unwrap();
        assert_eq!(country, back);

        let region = RegionCode::new("75C").unwrap();
        let json = serde_json::to_string(&region).unwrap();
        let back: RegionCode = serde_json::from_str(&json).unwrap();
        assert_eq!(region, back);
    }
}
