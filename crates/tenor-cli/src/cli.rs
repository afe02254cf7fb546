//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    AdjustArgs, CompoundArgs, DayCountArgs, InterestArgs, ObservationsArgs, ScheduleArgs,
};

/// Tenor - Deterministic ISDA calendar, day count and interest calculator
#[derive(Parser)]
#[command(name = "tenor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with engine limits
    #[arg(short, long, global = true, env = "TENOR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Year fraction and day count between two dates
    #[command(name = "daycount")]
    DayCount(DayCountArgs),

    /// Adjust a date to a business day
    Adjust(AdjustArgs),

    /// Generate a calculation period schedule
    Schedule(ScheduleArgs),

    /// Generate rate observation dates for one period
    Observations(ObservationsArgs),

    /// Calculate fixed interest for a period or a whole leg
    Interest(InterestArgs),

    /// Combine observed rates into one effective rate
    Compound(CompoundArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tenor",
            "daycount",
            "2024-01-01",
            "2024-07-01",
            "--format",
            "json",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::DayCount(_)));
    }
}
