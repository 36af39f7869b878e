//! # Countries Subcommand
//!
//! Prints the bundled ISO 3166-1 country table.

use anyhow::{Context, Result};
use clap::Args;

use geozones_core::RegionCatalog;

/// Arguments for the `geozones countries` subcommand.
#[derive(Args, Debug)]
pub struct CountriesArgs {
    /// Emit JSON records instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Print the country table.
pub fn run_countries(args: &CountriesArgs) -> Result<u8> {
    let catalog = RegionCatalog::load().context("failed to load reference data")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(catalog.countries())?);
    } else {
        for country in catalog.countries() {
            println!("{}  {}", country.code, country.name);
        }
    }

    Ok(0)
}
