//! ISDA day count reference values.
//!
//! Each case is an exact fixed-point expectation, so any rounding drift at
//! the 18th decimal place fails the test.

use rust_decimal_macros::dec;
use tenor_core::daycounts::{fraction, DayCountConvention};
use tenor_core::types::Date;
use tenor_core::TenorError;

fn date(s: &str) -> Date {
    Date::parse(s).unwrap()
}

fn yf(convention: DayCountConvention, start: &str, end: &str) -> rust_decimal::Decimal {
    fraction(convention, date(start), date(end), None, 1)
        .unwrap()
        .to_decimal()
        .unwrap()
}

// ============================================================================
// Worked examples
// ============================================================================

#[test]
fn act360_thirty_days() {
    assert_eq!(
        yf(DayCountConvention::Act360, "2024-01-01", "2024-01-31"),
        dec!(0.083333333333333333)
    );
}

#[test]
fn act365_fixed_full_year() {
    assert_eq!(
        yf(DayCountConvention::Act365Fixed, "2025-01-01", "2026-01-01"),
        dec!(1)
    );
}

#[test]
fn actact_isda_leap_year() {
    assert_eq!(
        yf(DayCountConvention::ActActIsda, "2024-01-01", "2025-01-01"),
        dec!(1)
    );
}

#[test]
fn thirty360_half_year() {
    assert_eq!(
        yf(DayCountConvention::Thirty360, "2024-01-01", "2024-07-01"),
        dec!(0.5)
    );
}

// ============================================================================
// ISDA 2006 Section 4.16 style cases
// ============================================================================

#[test]
fn actact_isda_straddling_year_end() {
    // 2003-11-01 to 2004-05-01: 61/365 + 121/366
    assert_eq!(
        yf(DayCountConvention::ActActIsda, "2003-11-01", "2004-05-01"),
        dec!(0.497724380567407740)
    );
}

#[test]
fn thirty_family_month_end_differences() {
    let cases = [
        (DayCountConvention::Thirty360, "2007-01-31", "2007-02-28", 28),
        (DayCountConvention::Thirty360E, "2007-01-31", "2007-02-28", 28),
        (DayCountConvention::Thirty360EIsda, "2007-01-31", "2007-02-28", 30),
        (DayCountConvention::Thirty360, "2007-02-28", "2007-03-31", 33),
        (DayCountConvention::Thirty360E, "2007-02-28", "2007-03-31", 32),
        (DayCountConvention::Thirty360EIsda, "2007-02-28", "2007-03-31", 30),
        (DayCountConvention::Thirty360, "2006-08-31", "2007-02-28", 178),
        (DayCountConvention::Thirty360EIsda, "2006-08-31", "2007-02-28", 180),
    ];

    for (convention, start, end, days) in cases {
        let count = tenor_core::daycounts::day_count(convention, date(start), date(end), None)
            .unwrap();
        assert_eq!(count, days, "{convention} {start} -> {end}");
    }
}

#[test]
fn thirty360e_isda_termination_date() {
    let start = date("2006-08-31");
    let end = date("2007-02-28");
    let with_termination =
        fraction(DayCountConvention::Thirty360EIsda, start, end, Some(end), 0).unwrap();
    assert_eq!(with_termination.to_decimal().unwrap(), dec!(0.494444444444444444));
}

#[test]
fn actact_icma_quarterly() {
    // 91 days * 4 / 365.25
    let value = fraction(
        DayCountConvention::ActActIcma,
        date("2025-01-01"),
        date("2025-04-02"),
        None,
        4,
    )
    .unwrap();
    assert_eq!(value.to_decimal().unwrap(), dec!(0.996577686516084873));
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn every_convention_rejects_reversed_dates() {
    for convention in DayCountConvention::all() {
        let result = fraction(*convention, date("2025-06-02"), date("2025-06-01"), None, 2);
        assert!(
            matches!(result, Err(TenorError::InvalidDates { .. })),
            "{convention}"
        );
    }
}

#[test]
fn icma_rejects_zero_frequency() {
    let result = fraction(
        DayCountConvention::ActActIcma,
        date("2025-01-01"),
        date("2025-07-01"),
        None,
        0,
    );
    assert!(matches!(result, Err(TenorError::InvalidFrequency { .. })));
}
