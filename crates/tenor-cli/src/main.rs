//! Tenor CLI - ISDA calendar, day count and interest calculations.
//!
//! # Usage
//!
//! ```bash
//! # Year fraction under every convention
//! tenor daycount 2024-01-01 2024-07-01
//!
//! # Adjust a weekend date
//! tenor adjust 2025-05-31 --convention following
//!
//! # Quarterly schedule, modified following, end-of-month roll
//! tenor schedule 2025-01-31 2027-01-31 --frequency 3M --roll eom --convention MF
//!
//! # Overnight observations with a 2-day lookback
//! tenor observations 2025-01-06 2025-04-07 --method daily --lookback 2
//!
//! # Fixed interest on a semiannual leg
//! tenor interest 2025-01-15 2030-01-15 --notional 10000000 --rate 0.0425 --leg 6M
//!
//! # Compound a set of overnight rates
//! tenor compound --rates 0.0431,0.0433,0.0430 --method straight
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tenor_core::EngineLimits;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Library crates log through `log`; the subscriber bridges those records
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let limits = match &cli.config {
        Some(path) => EngineLimits::from_file(path)
            .with_context(|| format!("loading limits from {}", path.display()))?,
        None => EngineLimits::default(),
    };
    tracing::debug!(?limits, "engine limits");

    let format = cli.format;
    match cli.command {
        Commands::DayCount(args) => commands::daycount::execute(args, format)?,
        Commands::Adjust(args) => commands::adjust::execute(args, format)?,
        Commands::Schedule(args) => commands::schedule::execute(args, format, limits, cli.quiet)?,
        Commands::Observations(args) => {
            commands::observations::execute(args, format, limits, cli.quiet)?;
        }
        Commands::Interest(args) => commands::interest::execute(args, format, limits)?,
        Commands::Compound(args) => commands::compound::execute(args, format)?,
    }

    Ok(())
}
