//! Day count command implementation.
//!
//! Shows the day count and year fraction between two dates under one or all
//! conventions.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_core::daycounts::DayCountConvention;
use tenor_core::types::Date;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, parse_optional_date};
use crate::output::{print_header, print_output};

/// Arguments for the daycount command.
#[derive(Args, Debug)]
pub struct DayCountArgs {
    /// Start date (YYYY-MM-DD)
    pub start: String,

    /// End date (YYYY-MM-DD)
    pub end: String,

    /// Convention (ACT/360, ACT/365F, ACT/ACT ISDA, ACT/ACT ICMA, 30/360,
    /// 30E/360, 30E/360 ISDA, 1/1). Omit to show all.
    #[arg(short = 'd', long)]
    pub convention: Option<String>,

    /// Termination date for 30E/360 ISDA (YYYY-MM-DD)
    #[arg(short, long)]
    pub termination: Option<String>,

    /// Coupons per year for ACT/ACT ICMA
    #[arg(long, default_value = "1")]
    pub frequency: u32,
}

/// One convention's result.
#[derive(Debug, Serialize, Tabled)]
pub struct DayCountRow {
    #[tabled(rename = "Convention")]
    pub convention: String,
    #[tabled(rename = "Days")]
    pub days: u64,
    #[tabled(rename = "Year Fraction")]
    pub year_fraction: String,
}

fn row(
    convention: DayCountConvention,
    start: Date,
    end: Date,
    termination: Option<Date>,
    frequency: u32,
) -> Result<DayCountRow> {
    let dc = convention.to_day_count(termination, frequency);
    Ok(DayCountRow {
        convention: convention.name().to_string(),
        days: dc.day_count(start, end)?,
        year_fraction: dc.year_fraction(start, end)?.to_string(),
    })
}

/// Execute the daycount command.
pub fn execute(args: DayCountArgs, format: OutputFormat) -> Result<()> {
    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;
    let termination = parse_optional_date(args.termination.as_deref())?;

    let conventions = match &args.convention {
        Some(name) => vec![name.parse::<DayCountConvention>()?],
        None => DayCountConvention::all().to_vec(),
    };

    let rows = conventions
        .into_iter()
        .map(|c| row(c, start, end, termination, args.frequency))
        .collect::<Result<Vec<_>>>()?;

    match format {
        OutputFormat::Table => {
            print_header(&format!("Day Counts {start} to {end}"));
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => {
            for r in &rows {
                println!("{}", r.year_fraction);
            }
        }
        _ => print_output(&rows, format)?,
    }

    Ok(())
}
