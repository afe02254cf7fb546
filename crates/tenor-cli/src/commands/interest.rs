//! Interest command implementation.
//!
//! Calculates fixed interest for a single period, or builds the cashflows of
//! a whole fixed leg when `--leg` is given.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_cashflows::cashflow::{
    build_cashflows, npv, round_payment, CashflowRecord, Currency, Direction, LegTerms,
};
use tenor_cashflows::interest::{accrued_interest, period_interest, AccrualBasis};
use tenor_cashflows::schedule::{CalculationPeriod, ScheduleGenerator};
use tenor_core::daycounts::DayCountConvention;
use tenor_core::types::{Date, Period};
use tenor_core::EngineLimits;
use tenor_math::FixedPoint;

use crate::cli::OutputFormat;
use crate::commands::schedule::ScheduleShape;
use crate::commands::{parse_date, parse_fixed, parse_fixed_list, parse_optional_date};
use crate::output::{print_header, print_info, print_key_values, print_output, KeyValue};

/// Arguments for the interest command.
#[derive(Args, Debug)]
pub struct InterestArgs {
    /// Accrual start (YYYY-MM-DD)
    pub start: String,

    /// Accrual end (YYYY-MM-DD)
    pub end: String,

    /// Notional amount
    #[arg(short, long)]
    pub notional: String,

    /// Annual rate as a decimal, e.g. 0.0425
    #[arg(short, long)]
    pub rate: String,

    /// Day count convention
    #[arg(short = 'd', long, default_value = "ACT/360")]
    pub day_count: String,

    /// Termination date for 30E/360 ISDA (YYYY-MM-DD)
    #[arg(short, long)]
    pub termination: Option<String>,

    /// Coupons per year for ACT/ACT ICMA
    #[arg(long, default_value = "1")]
    pub coupon_frequency: u32,

    /// Also report interest accrued to this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub accrual_date: Option<String>,

    /// Payment rounding increment
    #[arg(long, default_value = "0.01")]
    pub precision: String,

    /// Build a whole leg with this payment frequency, e.g. 6M
    #[arg(long)]
    pub leg: Option<String>,

    /// Leg direction: pay or receive
    #[arg(long, default_value = "receive")]
    pub direction: String,

    /// Leg currency
    #[arg(long, default_value = "USD")]
    pub currency: String,

    /// Discount factors, one per leg cashflow, for an NPV
    #[arg(long)]
    pub discount_factors: Option<String>,

    #[command(flatten)]
    pub shape: ScheduleShape,
}

/// One leg cashflow.
#[derive(Debug, Serialize, Tabled)]
pub struct CashflowRow {
    #[tabled(rename = "Payment")]
    pub payment_date: String,
    #[tabled(rename = "Start")]
    pub period_start: String,
    #[tabled(rename = "End")]
    pub period_end: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Direction")]
    pub direction: String,
    #[tabled(rename = "Ccy")]
    pub currency: String,
}

impl From<&CashflowRecord> for CashflowRow {
    fn from(cf: &CashflowRecord) -> Self {
        Self {
            payment_date: cf.payment_date.to_string(),
            period_start: cf.period_start.to_string(),
            period_end: cf.period_end.to_string(),
            amount: cf.amount.to_string(),
            direction: cf.direction.to_string(),
            currency: cf.currency.to_string(),
        }
    }
}

fn single_period(start: Date, end: Date) -> Result<CalculationPeriod> {
    Ok(CalculationPeriod {
        adjusted_start: start,
        adjusted_end: end,
        unadjusted_start: start,
        unadjusted_end: end,
        calendar_days: start.days_between(end)?,
        is_stub: false,
    })
}

fn period_results(
    notional: FixedPoint,
    rate: FixedPoint,
    period: &CalculationPeriod,
    basis: &AccrualBasis,
    precision: FixedPoint,
    accrual_date: Option<Date>,
) -> Result<Vec<KeyValue>> {
    let yf = basis.year_fraction(period.adjusted_start, period.adjusted_end)?;
    let interest = period_interest(notional, rate, period, basis)?;

    let mut results = vec![
        KeyValue::new("Day Count", basis.day_count),
        KeyValue::new("Days", period.calendar_days),
        KeyValue::new("Year Fraction", yf),
        KeyValue::from_percent("Rate", rate),
        KeyValue::new("Interest", interest),
        KeyValue::new("Payment", round_payment(interest, precision)?),
    ];
    if let Some(date) = accrual_date {
        let accrued = accrued_interest(notional, rate, period, date, basis)?;
        results.push(KeyValue::new(format!("Accrued to {date}"), accrued));
    }
    Ok(results)
}

/// Execute the interest command.
pub fn execute(args: InterestArgs, format: OutputFormat, limits: EngineLimits) -> Result<()> {
    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;
    let notional = parse_fixed("notional", &args.notional)?;
    let rate = parse_fixed("rate", &args.rate)?;
    let precision = parse_fixed("precision", &args.precision)?;

    let mut basis = AccrualBasis::new(args.day_count.parse::<DayCountConvention>()?)
        .with_frequency(args.coupon_frequency);
    if let Some(termination) = parse_optional_date(args.termination.as_deref())? {
        basis = basis.with_termination(termination);
    }

    let Some(leg_frequency) = &args.leg else {
        let period = single_period(start, end)?;
        let accrual_date = parse_optional_date(args.accrual_date.as_deref())?;
        let results = period_results(notional, rate, &period, &basis, precision, accrual_date)?;
        return print_key_values(
            &format!("Interest {start} to {end}"),
            &results,
            "Payment",
            format,
        );
    };

    let frequency: Period = leg_frequency.parse()?;
    let params = args.shape.params(start, end, frequency)?;
    let schedule = ScheduleGenerator::new(limits).generate(&params)?;
    let leg = LegTerms::new(
        notional,
        basis,
        args.direction.parse::<Direction>()?,
        args.currency.parse::<Currency>()?,
    )
    .with_payment_precision(Some(precision));

    let flows = build_cashflows(&schedule, &leg, rate)?;
    let rows: Vec<CashflowRow> = flows.iter().map(CashflowRow::from).collect();

    let leg_npv = match &args.discount_factors {
        Some(list) => {
            let dfs = parse_fixed_list("discount factor", list)?;
            Some(npv(&flows, &dfs)?)
        }
        None => None,
    };

    match format {
        OutputFormat::Table => {
            print_header(&format!("{frequency} Fixed Leg {start} to {end}"));
            print_output(&rows, format)?;
            if let Some(value) = leg_npv {
                print_info(&format!("NPV {value} {}", leg.currency));
            }
        }
        OutputFormat::Minimal => {
            for r in &rows {
                println!("{}", r.amount);
            }
        }
        _ => print_output(&rows, format)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(s: &str) -> FixedPoint {
        s.parse().unwrap()
    }

    #[test]
    fn test_period_results() {
        let period = single_period(parse_date("2025-01-01").unwrap(), parse_date("2026-01-01").unwrap())
            .unwrap();
        let basis = AccrualBasis::new(DayCountConvention::Act365Fixed);
        let results = period_results(
            fp("1000000"),
            fp("0.05"),
            &period,
            &basis,
            fp("0.01"),
            Some(parse_date("2025-07-02").unwrap()),
        )
        .unwrap();

        let value = |key: &str| results.iter().find(|r| r.key == key).unwrap().value.clone();
        assert_eq!(value("Days"), "365");
        assert_eq!(value("Year Fraction"), "1");
        assert_eq!(value("Payment"), "50000");
        assert_eq!(value("Rate"), "5%");
        // 182 days
        assert_eq!(value("Accrued to 2025-07-02"), "24931.5068493150685");
    }

    #[test]
    fn test_accrual_outside_period() {
        let period = single_period(parse_date("2025-01-01").unwrap(), parse_date("2025-04-01").unwrap())
            .unwrap();
        let basis = AccrualBasis::new(DayCountConvention::Act360);
        let result = period_results(
            fp("1000000"),
            fp("0.05"),
            &period,
            &basis,
            fp("0.01"),
            Some(parse_date("2025-05-01").unwrap()),
        );
        assert!(result.is_err());
    }
}
