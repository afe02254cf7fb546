//! Schedule command implementation.
//!
//! Generates adjusted calculation periods between two dates.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_cashflows::schedule::{
    RollConvention, Schedule, ScheduleGenerator, ScheduleParams, StubType,
};
use tenor_core::calendars::{BusinessDayAdjustments, BusinessDayConvention};
use tenor_core::types::{Date, Period};
use tenor_core::EngineLimits;

use crate::cli::OutputFormat;
use crate::commands::{parse_centers, parse_date};
use crate::output::{print_header, print_info, print_output};

/// Roll, stub and adjustment options shared by schedule-driven commands.
#[derive(Args, Debug, Clone)]
pub struct ScheduleShape {
    /// Roll convention: none, eom, imm, or a day of month (1-31)
    #[arg(long, default_value = "none")]
    pub roll: String,

    /// Stub flag: none, shortfirst, longfirst, shortlast, longlast, both
    #[arg(long, default_value = "none")]
    pub stub: String,

    /// Business day convention for period boundaries
    #[arg(short = 'b', long, default_value = "MF")]
    pub convention: String,

    /// Business centres, e.g. USNY+GBLO
    #[arg(long)]
    pub centers: Option<String>,
}

impl ScheduleShape {
    /// Builds schedule parameters from the parsed options.
    pub fn params(&self, effective: Date, termination: Date, frequency: Period) -> Result<ScheduleParams> {
        let adjustments = BusinessDayAdjustments::new(
            self.convention.parse::<BusinessDayConvention>()?,
            parse_centers(self.centers.as_deref())?,
        );
        Ok(ScheduleParams::new(effective, termination, frequency)
            .with_roll_convention(self.roll.parse::<RollConvention>()?)
            .with_stub_type(self.stub.parse::<StubType>()?)
            .with_adjustments(adjustments))
    }
}

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Effective date (YYYY-MM-DD)
    pub effective: String,

    /// Termination date (YYYY-MM-DD)
    pub termination: String,

    /// Period frequency, e.g. 1W, 3M, 6M, 1Y
    #[arg(long, default_value = "3M")]
    pub frequency: String,

    #[command(flatten)]
    pub shape: ScheduleShape,
}

/// One calculation period.
#[derive(Debug, Serialize, Tabled)]
pub struct PeriodRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Start")]
    pub adjusted_start: String,
    #[tabled(rename = "End")]
    pub adjusted_end: String,
    #[tabled(rename = "Unadj. Start")]
    pub unadjusted_start: String,
    #[tabled(rename = "Unadj. End")]
    pub unadjusted_end: String,
    #[tabled(rename = "Days")]
    pub days: u64,
    #[tabled(rename = "Stub")]
    pub is_stub: bool,
}

/// Converts a schedule into display rows.
pub fn period_rows(schedule: &Schedule) -> Vec<PeriodRow> {
    schedule
        .periods()
        .iter()
        .enumerate()
        .map(|(i, p)| PeriodRow {
            index: i + 1,
            adjusted_start: p.adjusted_start.to_string(),
            adjusted_end: p.adjusted_end.to_string(),
            unadjusted_start: p.unadjusted_start.to_string(),
            unadjusted_end: p.unadjusted_end.to_string(),
            days: p.calendar_days,
            is_stub: p.is_stub,
        })
        .collect()
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, format: OutputFormat, limits: EngineLimits, quiet: bool) -> Result<()> {
    let effective = parse_date(&args.effective)?;
    let termination = parse_date(&args.termination)?;
    let frequency: Period = args.frequency.parse()?;

    let params = args.shape.params(effective, termination, frequency)?;
    let schedule = ScheduleGenerator::new(limits).generate(&params)?;
    let rows = period_rows(&schedule);

    match format {
        OutputFormat::Table => {
            print_header(&format!("{frequency} Schedule {effective} to {termination}"));
            print_output(&rows, format)?;
            if !quiet {
                print_info(&format!(
                    "{} periods, adjusted {}",
                    rows.len(),
                    params.adjustments.convention
                ));
            }
        }
        OutputFormat::Minimal => {
            for date in schedule.adjusted_dates() {
                println!("{date}");
            }
        }
        _ => print_output(&rows, format)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(roll: &str, convention: &str) -> ScheduleShape {
        ScheduleShape {
            roll: roll.to_string(),
            stub: "none".to_string(),
            convention: convention.to_string(),
            centers: Some("USNY".to_string()),
        }
    }

    #[test]
    fn test_params_from_shape() {
        let params = shape("eom", "MF")
            .params(
                parse_date("2025-01-31").unwrap(),
                parse_date("2026-01-31").unwrap(),
                Period::months(3),
            )
            .unwrap();
        assert_eq!(params.roll_convention, RollConvention::EndOfMonth);
        assert_eq!(
            params.adjustments.convention,
            BusinessDayConvention::ModifiedFollowing
        );
    }

    #[test]
    fn test_period_rows() {
        let params = shape("none", "none")
            .params(
                parse_date("2024-01-01").unwrap(),
                parse_date("2025-01-01").unwrap(),
                Period::months(3),
            )
            .unwrap();
        let schedule = ScheduleGenerator::default().generate(&params).unwrap();
        let rows = period_rows(&schedule);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].adjusted_start, "2024-01-01");
        assert_eq!(rows[3].adjusted_end, "2025-01-01");
    }

    #[test]
    fn test_bad_roll_rejected() {
        let result = shape("sometimes", "MF").params(
            parse_date("2025-01-31").unwrap(),
            parse_date("2026-01-31").unwrap(),
            Period::months(3),
        );
        assert!(result.is_err());
    }
}
