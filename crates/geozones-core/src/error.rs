//! # Error Types
//!
//! Error types used throughout the GeoZones workspace. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// A supplied country or region code failed shape or membership validation.
///
/// Raised by the code constructors and by [`crate::filter::RegionFilter`]
/// mutators. A mutating call that produces this error leaves its target
/// unchanged — there are no partial updates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidCodeError {
    /// The country code is not two ASCII letters.
    #[error("invalid country code {0:?}: expected two ASCII letters (ISO 3166-1 alpha-2)")]
    CountryShape(String),

    /// The country code is well-formed but absent from the ISO 3166-1 table.
    #[error("unknown country code {0:?}: not in the ISO 3166-1 table")]
    UnknownCountry(String),

    /// The region code is not one to three ASCII letters or digits.
    #[error("invalid region code {0:?}: expected a 1-3 character ISO 3166-2 suffix")]
    RegionShape(String),
}

/// The bundled reference data could not be loaded.
///
/// The data files are embedded at compile time, so these errors indicate a
/// defective data revision rather than an environmental problem.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The embedded JSON could not be parsed.
    #[error("malformed reference data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A subdivision entry's code does not decompose as `country "-" region`.
    #[error("malformed subdivision code {code:?} in reference data")]
    MalformedCode {
        /// The offending ISO 3166-2 code.
        code: String,
    },
}
