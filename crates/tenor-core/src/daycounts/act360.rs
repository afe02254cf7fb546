//! Actual/360 day count convention.
//!
//! Used primarily for money market instruments and overnight-rate legs.

use tenor_math::FixedPoint;

use super::DayCount;
use crate::error::TenorResult;
use crate::types::Date;

/// Actual/360 day count convention.
///
/// The day count is the actual number of days between dates.
/// The year basis is always 360 days.
///
/// # Usage
///
/// - Money market instruments
/// - SOFR, ESTR and other overnight-indexed floating legs
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{360}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> TenorResult<FixedPoint> {
        let days = self.day_count(start, end)?;
        Ok(FixedPoint::from_ratio(u128::from(days), 360)?)
    }

    fn day_count(&self, start: Date, end: Date) -> TenorResult<u64> {
        start.days_between(end)
    }
}
