//! Interest amount calculation.
//!
//! Interest is always `notional × rate × fraction`, with the rate either
//! fixed or derived from compounded floating observations.

use serde::{Deserialize, Serialize};

use tenor_core::daycounts::{fraction, DayCountConvention};
use tenor_core::types::Date;
use tenor_math::FixedPoint;

use crate::compounding::{compound, CompoundingMethod, RateObservation};
use crate::error::{CashflowError, CashflowResult};
use crate::schedule::CalculationPeriod;

/// Floating leg rate terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatingRateTerms {
    /// How observations combine into one rate.
    pub method: CompoundingMethod,
    /// Applied to each observed rate before the spread.
    pub multiplier: FixedPoint,
    /// Added to the rate, before or after compounding depending on `method`.
    pub spread: FixedPoint,
}

impl Default for FloatingRateTerms {
    fn default() -> Self {
        Self {
            method: CompoundingMethod::Flat,
            multiplier: FixedPoint::ONE,
            spread: FixedPoint::ZERO,
        }
    }
}

impl FloatingRateTerms {
    /// Creates terms with a unit multiplier and no spread.
    #[must_use]
    pub fn new(method: CompoundingMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Sets the multiplier.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: FixedPoint) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Sets the spread.
    #[must_use]
    pub fn with_spread(mut self, spread: FixedPoint) -> Self {
        self.spread = spread;
        self
    }
}

/// Day-count inputs shared by period-based calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualBasis {
    /// Day count convention.
    pub day_count: DayCountConvention,
    /// Instrument termination date, for 30E/360 ISDA.
    pub termination: Option<Date>,
    /// Coupon frequency per year, for ACT/ACT ICMA.
    pub frequency: u32,
}

impl AccrualBasis {
    /// Creates a basis with no termination date and annual frequency.
    #[must_use]
    pub fn new(day_count: DayCountConvention) -> Self {
        Self {
            day_count,
            termination: None,
            frequency: 1,
        }
    }

    /// Sets the termination date.
    #[must_use]
    pub fn with_termination(mut self, termination: Date) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Year fraction between two dates under this basis.
    pub fn year_fraction(&self, start: Date, end: Date) -> CashflowResult<FixedPoint> {
        Ok(fraction(
            self.day_count,
            start,
            end,
            self.termination,
            self.frequency,
        )?)
    }
}

/// `notional × rate × fraction`.
pub fn fixed_interest(
    notional: FixedPoint,
    rate: FixedPoint,
    fraction: FixedPoint,
) -> CashflowResult<FixedPoint> {
    Ok(notional.checked_mul(rate)?.checked_mul(fraction)?)
}

/// Effective floating rate for a period.
///
/// Spread-inclusive methods compound `rate × multiplier + spread` per
/// observation. [`CompoundingMethod::SpreadExclusive`] compounds
/// `rate × multiplier` and adds the spread to the result.
pub fn floating_rate(
    observations: &[RateObservation],
    terms: &FloatingRateTerms,
    period_end: Date,
) -> CashflowResult<FixedPoint> {
    let include_spread = terms.method.is_spread_inclusive();
    let adjusted = observations
        .iter()
        .map(|o| {
            let mut rate = o.rate.checked_mul(terms.multiplier)?;
            if include_spread {
                rate = rate.checked_add(terms.spread)?;
            }
            Ok(RateObservation { rate, ..*o })
        })
        .collect::<CashflowResult<Vec<_>>>()?;

    let compounded = compound(terms.method, &adjusted, period_end)?;
    if include_spread {
        Ok(compounded)
    } else {
        Ok(compounded.checked_add(terms.spread)?)
    }
}

/// Floating interest: the effective rate times notional and fraction.
pub fn floating_interest(
    notional: FixedPoint,
    observations: &[RateObservation],
    terms: &FloatingRateTerms,
    period_end: Date,
    fraction: FixedPoint,
) -> CashflowResult<FixedPoint> {
    let rate = floating_rate(observations, terms, period_end)?;
    fixed_interest(notional, rate, fraction)
}

/// Interest over a whole calculation period at a known rate.
///
/// The fraction is taken over the adjusted period boundaries.
pub fn period_interest(
    notional: FixedPoint,
    rate: FixedPoint,
    period: &CalculationPeriod,
    basis: &AccrualBasis,
) -> CashflowResult<FixedPoint> {
    let yf = basis.year_fraction(period.adjusted_start, period.adjusted_end)?;
    fixed_interest(notional, rate, yf)
}

/// Interest accrued from the period start up to `accrual_date`.
///
/// # Errors
///
/// Returns `CashflowError::AccrualDateOutsidePeriod` unless the accrual date
/// lies within the adjusted period boundaries.
pub fn accrued_interest(
    notional: FixedPoint,
    rate: FixedPoint,
    period: &CalculationPeriod,
    accrual_date: Date,
    basis: &AccrualBasis,
) -> CashflowResult<FixedPoint> {
    if !period.contains(accrual_date) {
        return Err(CashflowError::AccrualDateOutsidePeriod {
            date: accrual_date,
            start: period.adjusted_start,
            end: period.adjusted_end,
        });
    }
    let yf = basis.year_fraction(period.adjusted_start, accrual_date)?;
    fixed_interest(notional, rate, yf)
}
