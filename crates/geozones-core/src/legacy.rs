//! # Legacy Country-Column Format
//!
//! Zones historically stored a single country per record in a plain text
//! column. Current records store a JSON array of country codes in the same
//! column. The helpers here convert an individual column value between the
//! two forms; the batch job that applies them to a table lives in the API
//! crate's `db::migrate` module.
//!
//! Both directions are skip-based rather than error-based: a value already
//! in the target form yields `None`, so re-running a migration over a
//! partially converted table is safe.

use serde::Serialize;

/// Convert a legacy single-valued column entry to the JSON-array form.
///
/// Returns the replacement value, or `None` when the value is already an
/// array (or is blank) and should be left alone.
pub fn upgrade_country_field(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with('[') {
        return None;
    }
    // serde_json handles quoting of the stored value.
    serde_json::to_string(&[trimmed]).ok()
}

/// Convert a JSON-array column entry back to the legacy single value.
///
/// Takes the first element of the array, discarding the rest. Returns
/// `None` when the value is not an array, or the array is empty, leaving
/// the column untouched.
pub fn downgrade_country_field(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.starts_with('[') {
        return None;
    }
    let parsed: Vec<String> = serde_json::from_str(trimmed).ok()?;
    parsed.into_iter().next()
}

/// Aggregate report of one batch migration run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MigrationOutcome {
    /// Rows rewritten to the target form.
    pub changed: u64,
    /// Rows already in the target form (or blank), left untouched.
    pub skipped: u64,
    /// Rows that could not be updated; logged and counted, never fatal.
    pub failed: u64,
}

impl MigrationOutcome {
    /// Total rows examined.
    pub fn total(&self) -> u64 {
        self.changed + self.skipped + self.failed
    }
}

impl std::fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} changed, {} skipped, {} failed",
            self.changed, self.skipped, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn upgrade_wraps_single_value() {
        assert_eq!(
            upgrade_country_field("en_GB").as_deref(),
            Some("[\"en_GB\"]")
        );
        assert_eq!(upgrade_country_field("GB").as_deref(), Some("[\"GB\"]"));
    }

    #[test]
    fn upgrade_skips_array_form_and_blank() {
        assert_eq!(upgrade_country_field("[\"GB\"]"), None);
        assert_eq!(upgrade_country_field("[\"GB\",\"US\"]"), None);
        assert_eq!(upgrade_country_field(""), None);
        assert_eq!(upgrade_country_field("   "), None);
    }

    #[test]
    fn upgrade_trims_whitespace() {
        assert_eq!(
            upgrade_country_field("  GB  ").as_deref(),
            Some("[\"GB\"]")
        );
    }

    #[test]
    fn downgrade_takes_first_element() {
        assert_eq!(downgrade_country_field("[\"en_GB\"]").as_deref(), Some("en_GB"));
        assert_eq!(
            downgrade_country_field("[\"GB\",\"US\"]").as_deref(),
            Some("GB")
        );
    }

    #[test]
    fn downgrade_skips_legacy_empty_and_malformed() {
        assert_eq!(downgrade_country_field("GB"), None);
        assert_eq!(downgrade_country_field(""), None);
        assert_eq!(downgrade_country_field("[]"), None);
        assert_eq!(downgrade_country_field("[not json"), None);
    }

    #[test]
    fn round_trip_restores_original() {
        let upgraded = upgrade_country_field("en_GB").unwrap();
        assert_eq!(downgrade_country_field(&upgraded).as_deref(), Some("en_GB"));
    }

    #[test]
    fn outcome_totals_and_display() {
        let outcome = MigrationOutcome {
            changed: 3,
            skipped: 2,
            failed: 1,
        };
        assert_eq!(outcome.total(), 6);
        assert_eq!(outcome.to_string(), "3 changed, 2 skipped, 1 failed");
        assert_eq!(MigrationOutcome::default().total(), 0);
    }

    proptest! {
        #[test]
        fn round_trip_law(value in "[A-Za-z][A-Za-z0-9_]{0,9}") {
            let upgraded = upgrade_country_field(&value).unwrap();
            prop_assert_eq!(downgrade_country_field(&upgraded), Some(value));
        }

        #[test]
        fn upgrade_is_not_reapplied(value in "[A-Za-z][A-Za-z0-9_]{0,9}") {
            let upgraded = upgrade_country_field(&value).unwrap();
            prop_assert_eq!(upgrade_country_field(&upgraded), None);
        }
    }
}
