//! # Migrate Subcommand
//!
//! Runs the legacy country-column batch migration against the database at
//! `DATABASE_URL`. The `up` direction wraps single-valued `countries`
//! entries in a JSON array; `down` reverses that, keeping the first array
//! element. Both directions skip rows already in the target form, so the
//! command is safe to re-run.

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};

use geozones_api::db;
use geozones_api::db::migrate::Direction;

/// Arguments for the `geozones migrate` subcommand.
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Which way to rewrite the countries column.
    #[arg(long, value_enum, default_value = "up")]
    pub direction: DirectionArg,

    /// Examine and report rows without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// CLI-facing direction flag.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => Direction::Up,
            DirectionArg::Down => Direction::Down,
        }
    }
}

/// Run the batch migration. Exit code 1 when any row failed.
pub fn run_migrate(args: &MigrateArgs) -> Result<u8> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async {
        let pool = db::init_pool()
            .await
            .context("database connection failed")?;
        let Some(pool) = pool else {
            bail!("DATABASE_URL is not set; the migrate command needs a database");
        };

        let outcome = db::migrate::run(&pool, args.direction.into(), args.dry_run)
            .await
            .context("migration batch failed")?;

        if args.dry_run {
            println!("dry run: {outcome}");
        } else {
            println!("{outcome}");
        }

        Ok(if outcome.failed > 0 { 1 } else { 0 })
    })
}
