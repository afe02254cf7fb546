//! Actual/365 Fixed day count convention.

use tenor_math::FixedPoint;

use super::DayCount;
use crate::error::TenorResult;
use crate::types::Date;

/// Actual/365 Fixed day count convention.
///
/// The day count is the actual number of days between dates.
/// The year basis is always 365 days, regardless of leap years.
///
/// # Usage
///
/// - GBP, AUD and NZD money markets
/// - SONIA floating legs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> TenorResult<FixedPoint> {
        let days = self.day_count(start, end)?;
        Ok(FixedPoint::from_ratio(u128::from(days), 365)?)
    }

    fn day_count(&self, start: Date, end: Date) -> TenorResult<u64> {
        start.days_between(end)
    }
}
