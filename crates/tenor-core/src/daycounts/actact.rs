//! Actual/Actual day count conventions.

use tenor_math::FixedPoint;

use super::DayCount;
use crate::error::{TenorError, TenorResult};
use crate::types::Date;

/// Actual/Actual ISDA day count convention.
///
/// Splits the period at year boundaries: days falling in a leap year are
/// divided by 366 and days in a non-leap year by 365.
///
/// # Formula
///
/// $$\text{YF} = \frac{\text{Days in non-leap}}{365} + \frac{\text{Days in leap}}{366}$$
///
/// Whole intervening years contribute exactly 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> TenorResult<FixedPoint> {
        let total_days = start.days_between(end)?;
        let (start_year, end_year) = (start.year(), end.year());

        if start_year == end_year {
            return Ok(FixedPoint::from_ratio(
                u128::from(total_days),
                u128::from(start.days_in_year()),
            )?);
        }

        // Fractional first year: start up to Jan 1 of the following year
        let next_year = Date::from_ymd(start_year + 1, 1, 1)?;
        let first = FixedPoint::from_ratio(
            u128::from(start.days_between(next_year)?),
            u128::from(start.days_in_year()),
        )?;

        // Whole intervening years count 1.0 each
        let whole = FixedPoint::try_from_int(u128::from(end_year - start_year - 1))?;

        // Fractional last year: Jan 1 of the end year up to end
        let last_year_start = end.start_of_year();
        let last = FixedPoint::from_ratio(
            u128::from(last_year_start.days_between(end)?),
            u128::from(end.days_in_year()),
        )?;

        Ok(first.checked_add(whole)?.checked_add(last)?)
    }

    fn day_count(&self, start: Date, end: Date) -> TenorResult<u64> {
        start.days_between(end)
    }
}

/// Actual/Actual ICMA day count convention.
///
/// Approximates the coupon period length as `365.25 / frequency` days, so
/// the fraction is `days * frequency / 365.25`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActActIcma {
    /// Coupon frequency (periods per year)
    frequency: u32,
}

impl ActActIcma {
    /// Creates a new ACT/ACT ICMA convention with given frequency.
    #[must_use]
    pub fn new(frequency: u32) -> Self {
        Self { frequency }
    }

    /// Creates with semi-annual frequency (default for bonds).
    #[must_use]
    pub fn semi_annual() -> Self {
        Self { frequency: 2 }
    }

    /// Returns the coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> u32 {
        self.frequency
    }
}

impl Default for ActActIcma {
    fn default() -> Self {
        Self::semi_annual()
    }
}

impl DayCount for ActActIcma {
    fn name(&self) -> &'static str {
        "ACT/ACT ICMA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> TenorResult<FixedPoint> {
        if self.frequency == 0 {
            return Err(TenorError::invalid_frequency(
                "ACT/ACT ICMA requires a coupon frequency above zero",
            ));
        }
        let days = self.day_count(start, end)?;
        // days * frequency / 365.25, kept integral by scaling both sides by 100
        let numerator = u128::from(days) * u128::from(self.frequency) * 100;
        Ok(FixedPoint::from_ratio(numerator, 36_525)?)
    }

    fn day_count(&self, start: Date, end: Date) -> TenorResult<u64> {
        start.days_between(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_actact_isda_full_year() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();

        // Full non-leap year
        assert_eq!(dc.year_fraction(start, end).unwrap(), FixedPoint::ONE);
    }

    #[test]
    fn test_actact_isda_leap() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();

        // Full leap year
        assert_eq!(dc.year_fraction(start, end).unwrap(), FixedPoint::ONE);
    }

    #[test]
    fn test_actact_isda_within_year() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2024, 7, 1).unwrap();

        // 182 / 366
        assert_eq!(
            dc.year_fraction(start, end).unwrap(),
            FixedPoint::from_ratio(182, 366).unwrap()
        );
    }

    #[test]
    fn test_actact_isda_cross_year() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2024, 7, 1).unwrap();
        let end = Date::from_ymd(2025, 7, 1).unwrap();

        // 184/366 in 2024 plus 181/365 in 2025
        let expected = FixedPoint::from_ratio(184, 366)
            .unwrap()
            .checked_add(FixedPoint::from_ratio(181, 365).unwrap())
            .unwrap();
        assert_eq!(dc.year_fraction(start, end).unwrap(), expected);
        assert_eq!(dc.day_count(start, end).unwrap(), 365);
    }

    #[test]
    fn test_actact_isda_multi_year() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2023, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();

        assert_eq!(dc.year_fraction(start, end).unwrap().to_decimal().unwrap(), dec!(3));
    }

    #[test]
    fn test_actact_icma() {
        let dc = ActActIcma::new(2);
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 7, 1).unwrap();

        // 181 * 2 / 365.25
        assert_eq!(
            dc.year_fraction(start, end).unwrap(),
            FixedPoint::from_ratio(36_200, 36_525).unwrap()
        );
    }

    #[test]
    fn test_actact_icma_zero_frequency() {
        let dc = ActActIcma::new(0);
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 7, 1).unwrap();

        assert!(matches!(
            dc.year_fraction(start, end),
            Err(TenorError::InvalidFrequency { .. })
        ));
    }
}
