//! ONE/ONE day count convention.

use tenor_math::FixedPoint;

use super::DayCount;
use crate::error::TenorResult;
use crate::types::Date;

/// 1/1: the year fraction is always exactly one.
///
/// Used for instruments that pay a full coupon regardless of period length,
/// such as some inflation and equity legs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneOne;

impl DayCount for OneOne {
    fn name(&self) -> &'static str {
        "1/1"
    }

    fn year_fraction(&self, start: Date, end: Date) -> TenorResult<FixedPoint> {
        start.days_between(end)?;
        Ok(FixedPoint::ONE)
    }

    fn day_count(&self, start: Date, end: Date) -> TenorResult<u64> {
        start.days_between(end)
    }
}
