//! # Regions Subcommand
//!
//! Prints matching subdivision records from the bundled catalog, filtered
//! by the same country/region-code rules the API applies.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use geozones_core::{RegionCatalog, RegionFilter};

use crate::split_csv;

/// Arguments for the `geozones regions` subcommand.
#[derive(Args, Debug)]
pub struct RegionsArgs {
    /// Comma-separated ISO 3166-1 alpha-2 codes, e.g. "GB,US".
    #[arg(long)]
    pub countries: Option<String>,

    /// Comma-separated ISO 3166-2 suffixes, e.g. "AL,AR".
    #[arg(long)]
    pub codes: Option<String>,

    /// Emit JSON records instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Print the matching catalog records.
pub fn run_regions(args: &RegionsArgs) -> Result<u8> {
    let catalog = Arc::new(RegionCatalog::load().context("failed to load reference data")?);

    let mut filter = RegionFilter::new(catalog);
    if let Some(countries) = &args.countries {
        filter.set_countries(split_csv(countries))?;
    }
    if let Some(codes) = &args.codes {
        filter.set_region_codes(split_csv(codes))?;
    }

    let regions = filter.regions();
    if args.json {
        println!("{}", serde_json::to_string_pretty(regions)?);
    } else {
        for record in regions {
            println!("{:<8} {:<14} {}", record.code, record.kind, record.name);
        }
        tracing::info!(matched = regions.len(), "catalog query finished");
    }

    Ok(0)
}
