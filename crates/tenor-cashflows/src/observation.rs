//! Floating-rate observation schedules.
//!
//! Generates the dates on which an external reference rate must be sampled
//! for one calculation period, either once per period (advance fixing) or
//! once per calendar day (overnight compounding).

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use tenor_core::calendars::{BusinessCenters, Calendar};
use tenor_core::types::Date;
use tenor_core::EngineLimits;
use tenor_math::FixedPoint;

use crate::error::{CashflowError, CashflowResult};

/// Offset in days used by single observations when no lookback is set.
pub const IN_ADVANCE_OFFSET_DAYS: u32 = 2;

/// How many observations a period gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObservationMethod {
    /// One observation ahead of the period start.
    #[default]
    Single,
    /// One observation per calendar day of the period.
    Daily,
}

/// Unit in which a lookback is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShiftUnit {
    /// Plain calendar days.
    #[default]
    CalendarDays,
    /// Business days in the configured centres.
    BusinessDays,
}

/// Observation generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationConfig {
    /// Single or daily observation.
    pub method: ObservationMethod,
    /// Days each observation is shifted back. `None` means the in-advance
    /// default for single observations and no shift for daily ones.
    pub lookback_days: Option<u32>,
    /// Unit of the lookback.
    #[serde(default)]
    pub shift_unit: ShiftUnit,
    /// Trailing daily observations flagged as rate cut-off.
    #[serde(default)]
    pub rate_cut_off_days: u32,
    /// Centres for business-day shifting.
    #[serde(default)]
    pub business_centers: BusinessCenters,
}

impl ObservationConfig {
    /// Creates a configuration for the given method with no lookback.
    #[must_use]
    pub fn new(method: ObservationMethod) -> Self {
        Self {
            method,
            lookback_days: None,
            shift_unit: ShiftUnit::CalendarDays,
            rate_cut_off_days: 0,
            business_centers: BusinessCenters::new(),
        }
    }

    /// Overnight-rate preset: daily observations with a 2-day lookback.
    #[must_use]
    pub fn overnight() -> Self {
        Self::new(ObservationMethod::Daily).with_lookback(2)
    }

    /// Advance-fixing preset: one observation 2 business days before the start.
    #[must_use]
    pub fn advance_fixing() -> Self {
        Self::new(ObservationMethod::Single)
            .with_lookback(IN_ADVANCE_OFFSET_DAYS)
            .with_shift_unit(ShiftUnit::BusinessDays)
    }

    /// Sets the lookback in days.
    #[must_use]
    pub fn with_lookback(mut self, days: u32) -> Self {
        self.lookback_days = Some(days);
        self
    }

    /// Sets the lookback unit.
    #[must_use]
    pub fn with_shift_unit(mut self, unit: ShiftUnit) -> Self {
        self.shift_unit = unit;
        self
    }

    /// Sets the rate cut-off window.
    #[must_use]
    pub fn with_rate_cut_off(mut self, days: u32) -> Self {
        self.rate_cut_off_days = days;
        self
    }

    /// Sets the business centres used for business-day shifting.
    #[must_use]
    pub fn with_business_centers(mut self, centers: BusinessCenters) -> Self {
        self.business_centers = centers;
        self
    }

    fn shift_back(&self, date: Date, days: u32) -> CashflowResult<Date> {
        let shifted = match self.shift_unit {
            ShiftUnit::CalendarDays => date.add_days(-i64::from(days))?,
            ShiftUnit::BusinessDays => {
                let days = i32::try_from(days)
                    .map_err(|_| CashflowError::invalid_frequency("lookback too large"))?;
                self.business_centers.add_business_days(date, -days)?
            }
        };
        Ok(shifted)
    }
}

/// One scheduled rate sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Date on which the rate is read.
    pub observation_date: Date,
    /// Date the rate applies to.
    pub effective_date: Date,
    /// Start of the calculation period.
    pub period_start: Date,
    /// End of the calculation period.
    pub period_end: Date,
    /// Share of the period carried by this observation.
    pub weight: FixedPoint,
    /// True inside the rate cut-off window. Advisory only: the caller
    /// substitutes the last non-cut-off rate.
    pub is_rate_cut_off: bool,
}

/// Generates observation schedules under configurable limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObservationScheduleGenerator {
    limits: EngineLimits,
}

impl ObservationScheduleGenerator {
    /// Creates a generator with the given limits.
    #[must_use]
    pub fn new(limits: EngineLimits) -> Self {
        Self { limits }
    }

    /// Generates observations for one calculation period.
    ///
    /// # Errors
    ///
    /// - `InvalidDates` if `period_end` is not after `period_start`
    /// - `InvalidCutOff` if the cut-off is not shorter than the period
    /// - `TooManyObservations` above the configured ceiling
    pub fn generate(
        &self,
        period_start: Date,
        period_end: Date,
        config: &ObservationConfig,
    ) -> CashflowResult<Vec<Observation>> {
        if period_end <= period_start {
            return Err(CashflowError::invalid_dates(period_start, period_end));
        }
        let period_days = period_start.days_between(period_end)?;
        if u64::from(config.rate_cut_off_days) >= period_days {
            return Err(CashflowError::InvalidCutOff {
                cut_off: config.rate_cut_off_days,
                period_days,
            });
        }

        let observations = match config.method {
            ObservationMethod::Single => {
                let offset = config.lookback_days.unwrap_or(IN_ADVANCE_OFFSET_DAYS);
                vec![Observation {
                    observation_date: config.shift_back(period_start, offset)?,
                    effective_date: period_start,
                    period_start,
                    period_end,
                    weight: FixedPoint::ONE,
                    is_rate_cut_off: false,
                }]
            }
            ObservationMethod::Daily => {
                self.daily(period_start, period_end, period_days, config)?
            }
        };

        debug!(
            "{} observations for {period_start} to {period_end} ({:?})",
            observations.len(),
            config.method
        );
        Ok(observations)
    }

    fn daily(
        &self,
        period_start: Date,
        period_end: Date,
        period_days: u64,
        config: &ObservationConfig,
    ) -> CashflowResult<Vec<Observation>> {
        let count = usize::try_from(period_days).unwrap_or(usize::MAX);
        let limit = self.limits.max_observations;
        if count > limit {
            warn!("observation window {period_start} to {period_end} exceeds {limit} days");
            return Err(CashflowError::TooManyObservations { count, limit });
        }

        let weight = FixedPoint::from_ratio(1, u128::from(period_days))?;
        let lookback = config.lookback_days.unwrap_or(0);
        let cut_off_from = count - config.rate_cut_off_days as usize;

        let mut observations = Vec::with_capacity(count);
        let mut effective = period_start;
        for i in 0..count {
            observations.push(Observation {
                observation_date: config.shift_back(effective, lookback)?,
                effective_date: effective,
                period_start,
                period_end,
                weight,
                is_rate_cut_off: i >= cut_off_from,
            });
            effective = effective.add_days(1)?;
        }
        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_single_default_offset() {
        let gen = ObservationScheduleGenerator::default();
        let config = ObservationConfig::new(ObservationMethod::Single);
        let obs = gen.generate(date(2025, 1, 15), date(2025, 4, 15), &config).unwrap();

        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].observation_date, date(2025, 1, 13));
        assert_eq!(obs[0].effective_date, date(2025, 1, 15));
        assert_eq!(obs[0].weight, FixedPoint::ONE);
    }

    #[test]
    fn test_advance_fixing_skips_weekend() {
        let gen = ObservationScheduleGenerator::default();
        // Monday start: two business days back is the previous Thursday
        let obs = gen
            .generate(date(2025, 1, 6), date(2025, 4, 7), &ObservationConfig::advance_fixing())
            .unwrap();
        assert_eq!(obs[0].observation_date, date(2025, 1, 2));
    }

    #[test]
    fn test_daily_with_lookback() {
        let gen = ObservationScheduleGenerator::default();
        let obs = gen
            .generate(date(2025, 1, 1), date(2025, 1, 8), &ObservationConfig::overnight())
            .unwrap();

        assert_eq!(obs.len(), 7);
        assert_eq!(obs[0].effective_date, date(2025, 1, 1));
        assert_eq!(obs[0].observation_date, date(2024, 12, 30));
        assert_eq!(obs[6].effective_date, date(2025, 1, 7));
        assert_eq!(obs[6].observation_date, date(2025, 1, 5));
        assert!(obs.iter().all(|o| o.weight == FixedPoint::from_ratio(1, 7).unwrap()));
        assert!(obs.iter().all(|o| !o.is_rate_cut_off));
    }

    #[test]
    fn test_daily_rate_cut_off_flags_tail() {
        let gen = ObservationScheduleGenerator::default();
        let config = ObservationConfig::new(ObservationMethod::Daily).with_rate_cut_off(2);
        let obs = gen.generate(date(2025, 3, 1), date(2025, 3, 11), &config).unwrap();

        let flagged: Vec<_> = obs.iter().filter(|o| o.is_rate_cut_off).collect();
        assert_eq!(flagged.len(), 2);
        assert_eq!(flagged[0].effective_date, date(2025, 3, 9));
        assert_eq!(flagged[1].effective_date, date(2025, 3, 10));
        // No lookback configured: observed on the day itself
        assert_eq!(obs[0].observation_date, obs[0].effective_date);
    }

    #[test]
    fn test_invalid_cut_off() {
        let gen = ObservationScheduleGenerator::default();
        let config = ObservationConfig::new(ObservationMethod::Daily).with_rate_cut_off(5);
        assert!(matches!(
            gen.generate(date(2025, 3, 1), date(2025, 3, 6), &config),
            Err(CashflowError::InvalidCutOff { cut_off: 5, period_days: 5 })
        ));
    }

    #[test]
    fn test_invalid_dates() {
        let gen = ObservationScheduleGenerator::default();
        let config = ObservationConfig::overnight();
        assert!(matches!(
            gen.generate(date(2025, 3, 1), date(2025, 3, 1), &config),
            Err(CashflowError::InvalidDates { .. })
        ));
    }

    #[test]
    fn test_too_many_observations() {
        let gen = ObservationScheduleGenerator::new(EngineLimits::default().with_max_observations(30));
        let config = ObservationConfig::overnight();
        assert!(matches!(
            gen.generate(date(2025, 1, 1), date(2025, 3, 1), &config),
            Err(CashflowError::TooManyObservations { count: 59, limit: 30 })
        ));
        assert_eq!(
            gen.generate(date(2025, 1, 1), date(2025, 1, 31), &config)
                .unwrap()
                .len(),
            30
        );
    }

    #[test]
    fn test_business_day_lookback_for_daily() {
        let gen = ObservationScheduleGenerator::default();
        let config = ObservationConfig::overnight().with_shift_unit(ShiftUnit::BusinessDays);
        // Tuesday 2025-01-07 shifted 2 business days back is Friday 2025-01-03
        let obs = gen.generate(date(2025, 1, 7), date(2025, 1, 8), &config).unwrap();
        assert_eq!(obs[0].observation_date, date(2025, 1, 3));
    }
}
