//! Compound command implementation.
//!
//! Combines a list of observed rates into one effective period rate.

use anyhow::{anyhow, ensure, Result};
use clap::Args;

use tenor_cashflows::compounding::{CompoundingMethod, RateObservation};
use tenor_cashflows::interest::{floating_rate, FloatingRateTerms};
use tenor_core::types::Date;
use tenor_math::FixedPoint;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, parse_fixed, parse_fixed_list, parse_optional_date};
use crate::output::{print_key_values, KeyValue};

/// Arguments for the compound command.
#[derive(Args, Debug)]
pub struct CompoundArgs {
    /// Observed rates as decimals, comma separated
    #[arg(short, long)]
    pub rates: String,

    /// Method: flat, none, straight, spreadexclusive, weighted, timeweighted
    #[arg(short, long, default_value = "flat")]
    pub method: String,

    /// Observation dates, comma separated. Defaults to consecutive days.
    #[arg(long)]
    pub dates: Option<String>,

    /// First observation date when --dates is omitted
    #[arg(long, default_value = "2025-01-01")]
    pub start: String,

    /// Period end for time weighting. Defaults to the day after the last date.
    #[arg(long)]
    pub period_end: Option<String>,

    /// Weights for weighted averaging, comma separated. Defaults to equal.
    #[arg(short, long)]
    pub weights: Option<String>,

    /// Multiplier applied to each rate
    #[arg(long, default_value = "1")]
    pub multiplier: String,

    /// Spread added before or after compounding, by method
    #[arg(short, long, default_value = "0")]
    pub spread: String,
}

fn observation_dates(args: &CompoundArgs, count: usize) -> Result<Vec<Date>> {
    match &args.dates {
        Some(list) => {
            let dates = list
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(parse_date)
                .collect::<Result<Vec<_>, _>>()?;
            ensure!(
                dates.len() == count,
                "{} dates given for {count} rates",
                dates.len()
            );
            Ok(dates)
        }
        None => {
            let start = parse_date(&args.start)?;
            (0..count)
                .map(|i| Ok(start.add_days(i as i64)?))
                .collect()
        }
    }
}

fn observations(args: &CompoundArgs) -> Result<Vec<RateObservation>> {
    let rates = parse_fixed_list("rate", &args.rates)?;
    ensure!(!rates.is_empty(), "at least one rate is required");

    let dates = observation_dates(args, rates.len())?;
    let weights = match &args.weights {
        Some(list) => parse_fixed_list("weight", list)?,
        None => vec![FixedPoint::from_ratio(1, rates.len() as u128)?; rates.len()],
    };
    ensure!(
        weights.len() == rates.len(),
        "{} weights given for {} rates",
        weights.len(),
        rates.len()
    );

    Ok(rates
        .into_iter()
        .zip(dates)
        .zip(weights)
        .map(|((rate, date), weight)| RateObservation::new(date, rate, weight))
        .collect())
}

fn effective_rate(args: &CompoundArgs) -> Result<Vec<KeyValue>> {
    let method: CompoundingMethod = args.method.parse()?;
    let observations = observations(args)?;
    let period_end = match parse_optional_date(args.period_end.as_deref())? {
        Some(date) => date,
        None => observations
            .last()
            .map(|o| o.date)
            .ok_or_else(|| anyhow!("at least one rate is required"))?
            .add_days(1)?,
    };
    let terms = FloatingRateTerms::new(method)
        .with_multiplier(parse_fixed("multiplier", &args.multiplier)?)
        .with_spread(parse_fixed("spread", &args.spread)?);

    let rate = floating_rate(&observations, &terms, period_end)?;
    Ok(vec![
        KeyValue::new("Method", method),
        KeyValue::new("Observations", observations.len()),
        KeyValue::new("Period End", period_end),
        KeyValue::new("Effective Rate", rate),
        KeyValue::from_percent("Effective Rate (%)", rate),
    ])
}

/// Execute the compound command.
pub fn execute(args: CompoundArgs, format: OutputFormat) -> Result<()> {
    let results = effective_rate(&args)?;
    print_key_values("Compounded Rate", &results, "Effective Rate", format)
}
