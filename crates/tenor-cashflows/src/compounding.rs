//! Rate compounding.
//!
//! Combines the rates observed over a calculation period into one effective
//! rate for the period.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tenor_core::types::Date;
use tenor_core::TenorError;
use tenor_math::{average, FixedPoint};

use crate::error::{CashflowError, CashflowResult};

/// Allowed distance of a weight total from 1.0 (10^-4).
pub const WEIGHT_TOLERANCE: FixedPoint = FixedPoint::from_raw(100_000_000_000_000);

/// Method for combining several observed rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompoundingMethod {
    /// Arithmetic mean.
    #[default]
    Flat,
    /// Arithmetic mean; kept distinct for round-tripping ISDA names.
    None,
    /// Geometric: ∏(1 + rᵢ) − 1.
    Straight,
    /// Geometric product divided by N, with the spread added afterwards.
    ///
    /// `(∏(1 + rᵢ) − 1) / N` approximates an Nth-root average; it is not one.
    SpreadExclusive,
    /// Σ rᵢ·wᵢ with weights summing to one.
    WeightedAverage,
    /// Σ rᵢ·daysᵢ / Σ daysᵢ.
    TimeWeightedAverage,
}

impl CompoundingMethod {
    /// True when a floating spread is added to each rate before combining.
    #[must_use]
    pub fn is_spread_inclusive(&self) -> bool {
        !matches!(self, CompoundingMethod::SpreadExclusive)
    }
}

impl fmt::Display for CompoundingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompoundingMethod::Flat => "Flat",
            CompoundingMethod::None => "None",
            CompoundingMethod::Straight => "Straight",
            CompoundingMethod::SpreadExclusive => "Spread Exclusive",
            CompoundingMethod::WeightedAverage => "Weighted Average",
            CompoundingMethod::TimeWeightedAverage => "Time Weighted Average",
        };
        write!(f, "{name}")
    }
}

impl FromStr for CompoundingMethod {
    type Err = TenorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "flat" => Ok(CompoundingMethod::Flat),
            "none" => Ok(CompoundingMethod::None),
            "straight" => Ok(CompoundingMethod::Straight),
            "spreadexclusive" => Ok(CompoundingMethod::SpreadExclusive),
            "weightedaverage" | "weighted" => Ok(CompoundingMethod::WeightedAverage),
            "timeweightedaverage" | "timeweighted" => Ok(CompoundingMethod::TimeWeightedAverage),
            _ => Err(TenorError::unsupported("compounding method", s)),
        }
    }
}

/// A rate known for one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateObservation {
    /// Date the rate applies from.
    pub date: Date,
    /// Observed rate.
    pub rate: FixedPoint,
    /// Weight used by [`CompoundingMethod::WeightedAverage`].
    pub weight: FixedPoint,
}

impl RateObservation {
    /// Creates an observation.
    #[must_use]
    pub fn new(date: Date, rate: FixedPoint, weight: FixedPoint) -> Self {
        Self { date, rate, weight }
    }
}

/// Combines observations with the given method.
///
/// Time weights run from each observation date to the next, and from the
/// last observation to `period_end`, so observations must be in date order.
pub fn compound(
    method: CompoundingMethod,
    observations: &[RateObservation],
    period_end: Date,
) -> CashflowResult<FixedPoint> {
    if observations.is_empty() {
        return Err(CashflowError::EmptyObservations);
    }
    let rates: Vec<FixedPoint> = observations.iter().map(|o| o.rate).collect();

    match method {
        CompoundingMethod::Flat | CompoundingMethod::None => flat(&rates),
        CompoundingMethod::Straight => straight(&rates),
        CompoundingMethod::SpreadExclusive => spread_exclusive(&rates),
        CompoundingMethod::WeightedAverage => {
            let weights: Vec<FixedPoint> = observations.iter().map(|o| o.weight).collect();
            weighted_average(&rates, &weights)
        }
        CompoundingMethod::TimeWeightedAverage => {
            let days = observations
                .iter()
                .enumerate()
                .map(|(i, o)| {
                    let next = observations.get(i + 1).map_or(period_end, |n| n.date);
                    o.date.days_between(next)
                })
                .collect::<Result<Vec<_>, _>>()?;
            time_weighted_average(&rates, &days)
        }
    }
}

/// Arithmetic mean of the rates.
pub fn flat(rates: &[FixedPoint]) -> CashflowResult<FixedPoint> {
    if rates.is_empty() {
        return Err(CashflowError::EmptyObservations);
    }
    Ok(average(rates)?)
}

/// Geometric compounding: ∏(1 + rᵢ) − 1, each product step rounded.
pub fn straight(rates: &[FixedPoint]) -> CashflowResult<FixedPoint> {
    if rates.is_empty() {
        return Err(CashflowError::EmptyObservations);
    }
    let mut product = FixedPoint::ONE;
    for rate in rates {
        product = product.checked_mul(FixedPoint::ONE.checked_add(*rate)?)?;
    }
    Ok(product.checked_sub(FixedPoint::ONE)?)
}

/// Geometric compounding divided by the observation count.
pub fn spread_exclusive(rates: &[FixedPoint]) -> CashflowResult<FixedPoint> {
    let compounded = straight(rates)?;
    Ok(compounded.checked_div_int(rates.len() as u128)?)
}

/// Σ rᵢ·wᵢ; the weights must sum to 1 within [`WEIGHT_TOLERANCE`].
pub fn weighted_average(rates: &[FixedPoint], weights: &[FixedPoint]) -> CashflowResult<FixedPoint> {
    if rates.is_empty() {
        return Err(CashflowError::EmptyObservations);
    }
    if rates.len() != weights.len() {
        return Err(CashflowError::length_mismatch(rates.len(), weights.len()));
    }

    let mut sum = FixedPoint::ZERO;
    for weight in weights {
        sum = sum.checked_add(*weight)?;
    }
    let distance = if sum >= FixedPoint::ONE {
        sum.checked_sub(FixedPoint::ONE)?
    } else {
        FixedPoint::ONE.checked_sub(sum)?
    };
    if distance > WEIGHT_TOLERANCE {
        return Err(CashflowError::InvalidWeights { sum });
    }

    let mut total = FixedPoint::ZERO;
    for (rate, weight) in rates.iter().zip(weights) {
        total = total.checked_add(rate.checked_mul(*weight)?)?;
    }
    Ok(total)
}

/// Σ rᵢ·daysᵢ / Σ daysᵢ.
pub fn time_weighted_average(rates: &[FixedPoint], days: &[u64]) -> CashflowResult<FixedPoint> {
    if rates.is_empty() {
        return Err(CashflowError::EmptyObservations);
    }
    if rates.len() != days.len() {
        return Err(CashflowError::length_mismatch(rates.len(), days.len()));
    }

    let mut weighted = FixedPoint::ZERO;
    let mut total_days: u128 = 0;
    for (rate, d) in rates.iter().zip(days) {
        weighted = weighted.checked_add(rate.checked_mul_int(u128::from(*d))?)?;
        total_days += u128::from(*d);
    }
    Ok(weighted.checked_div_int(total_days)?)
}
