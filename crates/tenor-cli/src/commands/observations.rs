//! Observations command implementation.
//!
//! Lays out the rate observation dates for one calculation period.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_cashflows::observation::{
    Observation, ObservationConfig, ObservationMethod, ObservationScheduleGenerator, ShiftUnit,
};
use tenor_core::EngineLimits;

use crate::cli::OutputFormat;
use crate::commands::{parse_centers, parse_date};
use crate::output::{print_header, print_info, print_output};

/// Arguments for the observations command.
#[derive(Args, Debug)]
pub struct ObservationsArgs {
    /// Period start (YYYY-MM-DD)
    pub start: String,

    /// Period end (YYYY-MM-DD)
    pub end: String,

    /// Observation method: single or daily
    #[arg(short, long, default_value = "daily")]
    pub method: String,

    /// Lookback in days
    #[arg(short, long)]
    pub lookback: Option<u32>,

    /// Count the lookback in business days instead of calendar days
    #[arg(long)]
    pub business_days: bool,

    /// Trailing days flagged as rate cut-off
    #[arg(long, default_value = "0")]
    pub cut_off: u32,

    /// Business centres for business-day lookback, e.g. USNY
    #[arg(long)]
    pub centers: Option<String>,
}

impl ObservationsArgs {
    fn config(&self) -> Result<ObservationConfig> {
        let method = match self.method.to_ascii_lowercase().as_str() {
            "single" | "advance" => ObservationMethod::Single,
            "daily" | "overnight" => ObservationMethod::Daily,
            other => bail!("Unknown observation method: {other}. Use single or daily."),
        };
        let shift_unit = if self.business_days {
            ShiftUnit::BusinessDays
        } else {
            ShiftUnit::CalendarDays
        };

        let mut config = ObservationConfig::new(method)
            .with_shift_unit(shift_unit)
            .with_rate_cut_off(self.cut_off)
            .with_business_centers(parse_centers(self.centers.as_deref())?);
        if let Some(days) = self.lookback {
            config = config.with_lookback(days);
        }
        Ok(config)
    }
}

/// One observation.
#[derive(Debug, Serialize, Tabled)]
pub struct ObservationRow {
    #[tabled(rename = "Observed")]
    pub observation_date: String,
    #[tabled(rename = "Effective")]
    pub effective_date: String,
    #[tabled(rename = "Weight")]
    pub weight: String,
    #[tabled(rename = "Cut-off")]
    pub is_rate_cut_off: bool,
}

impl From<&Observation> for ObservationRow {
    fn from(o: &Observation) -> Self {
        Self {
            observation_date: o.observation_date.to_string(),
            effective_date: o.effective_date.to_string(),
            weight: o.weight.to_string(),
            is_rate_cut_off: o.is_rate_cut_off,
        }
    }
}

/// Execute the observations command.
pub fn execute(args: ObservationsArgs, format: OutputFormat, limits: EngineLimits, quiet: bool) -> Result<()> {
    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;
    let config = args.config()?;

    let observations = ObservationScheduleGenerator::new(limits).generate(start, end, &config)?;
    let rows: Vec<ObservationRow> = observations.iter().map(ObservationRow::from).collect();

    match format {
        OutputFormat::Table => {
            print_header(&format!("Observations {start} to {end}"));
            print_output(&rows, format)?;
            if !quiet && config.rate_cut_off_days > 0 {
                print_info("Cut-off rows take the last rate observed before the cut-off");
            }
        }
        OutputFormat::Minimal => {
            for r in &rows {
                println!("{}", r.observation_date);
            }
        }
        _ => print_output(&rows, format)?,
    }

    Ok(())
}
