//! 30/360 day count conventions.
//!
//! All variants share the formula
//! `360 * (Y2 - Y1) + 30 * (M2 - M1) + (D2 - D1)` over a 360-day year and
//! differ only in how the day-of-month values are clamped.

use tenor_math::FixedPoint;

use super::DayCount;
use crate::error::TenorResult;
use crate::types::Date;

// =============================================================================
// Helper Functions
// =============================================================================

/// Applies the 30/360 formula to already-clamped day values.
///
/// Fails if `end` precedes `start`. A span can still come out negative when
/// clamping moves the start day past the end day in the same month, in which
/// case it is floored at zero.
fn thirty_360_days(start: Date, end: Date, d1: u32, d2: u32) -> TenorResult<u64> {
    start.days_between(end)?;
    if start == end {
        return Ok(0);
    }

    let days = 360 * (i64::from(end.year()) - i64::from(start.year()))
        + 30 * (i64::from(end.month()) - i64::from(start.month()))
        + (i64::from(d2) - i64::from(d1));

    Ok(u64::try_from(days).unwrap_or(0))
}

fn over_360(days: u64) -> TenorResult<FixedPoint> {
    Ok(FixedPoint::from_ratio(u128::from(days), 360)?)
}

// =============================================================================
// 30/360 (Bond Basis)
// =============================================================================

/// 30/360 Bond Basis day count convention.
///
/// Also known as "30/360 ISDA" (2006 definitions, 4.16(f)).
///
/// # Rules
///
/// 1. If D1 is 31, change D1 to 30
/// 2. If D2 is 31 AND D1 is now 30, change D2 to 30
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360;

impl DayCount for Thirty360 {
    fn name(&self) -> &'static str {
        "30/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> TenorResult<FixedPoint> {
        over_360(self.day_count(start, end)?)
    }

    fn day_count(&self, start: Date, end: Date) -> TenorResult<u64> {
        let d1 = start.day().min(30);
        let mut d2 = end.day();

        if d2 == 31 && d1 == 30 {
            d2 = 30;
        }

        thirty_360_days(start, end, d1, d2)
    }
}

// =============================================================================
// 30E/360 (Eurobond Basis)
// =============================================================================

/// 30E/360 day count convention (Eurobond Basis).
///
/// # Rules
///
/// 1. If D1 is 31, change D1 to 30
/// 2. If D2 is 31, change D2 to 30
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> TenorResult<FixedPoint> {
        over_360(self.day_count(start, end)?)
    }

    fn day_count(&self, start: Date, end: Date) -> TenorResult<u64> {
        thirty_360_days(start, end, start.day().min(30), end.day().min(30))
    }
}

// =============================================================================
// 30E/360 ISDA
// =============================================================================

/// 30E/360 ISDA day count convention.
///
/// # Rules
///
/// 1. If D1 is 31 or the last day of February, change D1 to 30
/// 2. If D2 is 31, change D2 to 30
/// 3. If D2 is the last day of February and the end date is not the
///    termination date, change D2 to 30
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360EIsda {
    /// The termination date of the instrument, if known.
    termination_date: Option<Date>,
}

impl Thirty360EIsda {
    /// Creates a new 30E/360 ISDA convention.
    #[must_use]
    pub fn new(termination_date: Option<Date>) -> Self {
        Self { termination_date }
    }

    /// Returns the termination date, if any.
    #[must_use]
    pub fn termination_date(&self) -> Option<Date> {
        self.termination_date
    }
}

impl DayCount for Thirty360EIsda {
    fn name(&self) -> &'static str {
        "30E/360 ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> TenorResult<FixedPoint> {
        over_360(self.day_count(start, end)?)
    }

    fn day_count(&self, start: Date, end: Date) -> TenorResult<u64> {
        let mut d1 = start.day();
        let mut d2 = end.day();

        if d1 == 31 || start.is_last_day_of_february() {
            d1 = 30;
        }

        let is_termination = self.termination_date == Some(end);
        if d2 == 31 || (end.is_last_day_of_february() && !is_termination) {
            d2 = 30;
        }

        thirty_360_days(start, end, d1, d2)
    }
}
