//! # geozones CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros for argument parsing.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use geozones_cli::countries::{run_countries, CountriesArgs};
use geozones_cli::migrate::{run_migrate, MigrateArgs};
use geozones_cli::regions::{run_regions, RegionsArgs};

/// GeoZones administration CLI.
///
/// Catalog queries against the bundled ISO 3166 data and the legacy
/// country-column migration for the zones table.
#[derive(Parser, Debug)]
#[command(name = "geozones", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run or reverse the legacy country-column migration.
    Migrate(MigrateArgs),

    /// Print matching subdivision records from the bundled catalog.
    Regions(RegionsArgs),

    /// Print the ISO 3166-1 country table.
    Countries(CountriesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Migrate(args) => run_migrate(&args),
        Commands::Regions(args) => run_regions(&args),
        Commands::Countries(args) => run_countries(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geozones_cli::migrate::DirectionArg;

    #[test]
    fn cli_parse_migrate_defaults() {
        let cli = Cli::try_parse_from(["geozones", "migrate"]).unwrap();
        if let Commands::Migrate(args) = cli.command {
            assert_eq!(args.direction, DirectionArg::Up);
            assert!(!args.dry_run);
        } else {
            panic!("expected Migrate");
        }
    }

    #[test]
    fn cli_parse_migrate_down_dry_run() {
        let cli =
            Cli::try_parse_from(["geozones", "migrate", "--direction", "down", "--dry-run"])
                .unwrap();
        if let Commands::Migrate(args) = cli.command {
            assert_eq!(args.direction, DirectionArg::Down);
            assert!(args.dry_run);
        } else {
            panic!("expected Migrate");
        }
    }

    #[test]
    fn cli_parse_migrate_rejects_bad_direction() {
        let result = Cli::try_parse_from(["geozones", "migrate", "--direction", "sideways"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_regions_with_filters() {
        let cli = Cli::try_parse_from([
            "geozones",
            "regions",
            "--countries",
            "GB,US",
            "--codes",
            "AL,AR",
            "--json",
        ])
        .unwrap();
        if let Commands::Regions(args) = cli.command {
            assert_eq!(args.countries.as_deref(), Some("GB,US"));
            assert_eq!(args.codes.as_deref(), Some("AL,AR"));
            assert!(args.json);
        } else {
            panic!("expected Regions");
        }
    }

    #[test]
    fn cli_parse_regions_bare() {
        let cli = Cli::try_parse_from(["geozones", "regions"]).unwrap();
        if let Commands::Regions(args) = cli.command {
            assert!(args.countries.is_none());
            assert!(args.codes.is_none());
            assert!(!args.json);
        } else {
            panic!("expected Regions");
        }
    }

    #[test]
    fn cli_parse_countries() {
        let cli = Cli::try_parse_from(["geozones", "countries", "--json"]).unwrap();
        if let Commands::Countries(args) = cli.command {
            assert!(args.json);
        } else {
            panic!("expected Countries");
        }
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["geozones", "countries"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli2 = Cli::try_parse_from(["geozones", "-vv", "countries"]).unwrap();
        assert_eq!(cli2.verbose, 2);
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["geozones"]).is_err());
    }

    #[test]
    fn cli_parse_invalid_subcommand_errors() {
        assert!(Cli::try_parse_from(["geozones", "nonexistent"]).is_err());
    }
}
