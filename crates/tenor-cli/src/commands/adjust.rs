//! Adjust command implementation.
//!
//! Moves a date onto a business day under one or all conventions, and can
//! shift it by a number of business days.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_core::calendars::{BusinessCenters, BusinessDayConvention, Calendar};
use tenor_core::types::Date;

use crate::cli::OutputFormat;
use crate::commands::{parse_centers, parse_date};
use crate::output::{print_header, print_output};

/// Arguments for the adjust command.
#[derive(Args, Debug)]
pub struct AdjustArgs {
    /// Date to adjust (YYYY-MM-DD)
    pub date: String,

    /// Convention (none, following, MF, preceding, MP, nearest). Omit to show all.
    #[arg(short = 'b', long)]
    pub convention: Option<String>,

    /// Business centres, e.g. USNY+GBLO
    #[arg(long)]
    pub centers: Option<String>,

    /// Also add this many business days (negative moves back)
    #[arg(long, allow_hyphen_values = true)]
    pub add: Option<i32>,
}

/// One adjusted date.
#[derive(Debug, Serialize, Tabled)]
pub struct AdjustRow {
    #[tabled(rename = "Convention")]
    pub convention: String,
    #[tabled(rename = "Adjusted")]
    pub adjusted: String,
    #[tabled(rename = "Weekday")]
    pub weekday: String,
}

fn adjust_rows(
    date: Date,
    conventions: &[BusinessDayConvention],
    centers: &BusinessCenters,
    add: Option<i32>,
) -> Result<Vec<AdjustRow>> {
    let mut rows = conventions
        .iter()
        .map(|&convention| {
            let adjusted = centers.adjust(date, convention)?;
            Ok(AdjustRow {
                convention: convention.to_string(),
                adjusted: adjusted.to_string(),
                weekday: adjusted.weekday().to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(days) = add {
        let shifted = centers.add_business_days(date, days)?;
        rows.push(AdjustRow {
            convention: format!("{days:+} business days"),
            adjusted: shifted.to_string(),
            weekday: shifted.weekday().to_string(),
        });
    }
    Ok(rows)
}

/// Execute the adjust command.
pub fn execute(args: AdjustArgs, format: OutputFormat) -> Result<()> {
    let date = parse_date(&args.date)?;
    let centers = parse_centers(args.centers.as_deref())?;
    let conventions = match &args.convention {
        Some(name) => vec![name.parse::<BusinessDayConvention>()?],
        None => BusinessDayConvention::all().to_vec(),
    };

    let rows = adjust_rows(date, &conventions, &centers, args.add)?;

    match format {
        OutputFormat::Table => {
            print_header(&format!("{date} ({})", date.weekday()));
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => {
            for r in &rows {
                println!("{}", r.adjusted);
            }
        }
        _ => print_output(&rows, format)?,
    }

    Ok(())
}
