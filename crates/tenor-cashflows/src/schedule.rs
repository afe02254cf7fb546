//! Calculation period schedule generation.
//!
//! This module provides schedule generation with support for:
//! - Any [`Period`] frequency (days, weeks, months, years)
//! - Roll conventions (end-of-month, fixed day-of-month, IMM)
//! - Stub flagging on the first and/or last period
//! - Business day adjustments
//!
//! # Example
//!
//! ```rust
//! use tenor_cashflows::schedule::{ScheduleGenerator, ScheduleParams};
//! use tenor_core::types::{Date, Period};
//!
//! let params = ScheduleParams::new(
//!     Date::from_ymd(2024, 1, 1).unwrap(),
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     Period::months(3),
//! );
//!
//! let schedule = ScheduleGenerator::default().generate(&params).unwrap();
//! assert_eq!(schedule.len(), 4);
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tenor_core::calendars::BusinessDayAdjustments;
use tenor_core::types::{Date, Period, TimeUnit, Weekday};
use tenor_core::{EngineLimits, TenorError};

use crate::error::{CashflowError, CashflowResult};

/// Stub period marking for irregular first or last periods.
///
/// Stubs are flags only: generation always rolls forward from the effective
/// date, so any irregular remainder ends up in the final period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StubType {
    /// No stub
    #[default]
    None,
    /// Short first period (front stub)
    ShortFirst,
    /// Long first period (front stub)
    LongFirst,
    /// Short last period (back stub)
    ShortLast,
    /// Long last period (back stub)
    LongLast,
    /// Both first and last periods are stubs
    Both,
}

impl StubType {
    /// Returns true if this is a front stub (affects first period).
    #[must_use]
    pub fn is_front_stub(&self) -> bool {
        matches!(self, StubType::ShortFirst | StubType::LongFirst | StubType::Both)
    }

    /// Returns true if this is a back stub (affects last period).
    #[must_use]
    pub fn is_back_stub(&self) -> bool {
        matches!(self, StubType::ShortLast | StubType::LongLast | StubType::Both)
    }
}

impl FromStr for StubType {
    type Err = TenorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "none" => Ok(StubType::None),
            "shortfirst" => Ok(StubType::ShortFirst),
            "longfirst" => Ok(StubType::LongFirst),
            "shortlast" => Ok(StubType::ShortLast),
            "longlast" => Ok(StubType::LongLast),
            "both" => Ok(StubType::Both),
            _ => Err(TenorError::unsupported("stub type", s)),
        }
    }
}

/// Rule pinning the day-of-month of generated period boundaries.
///
/// Only month and year frequencies are rolled; day and week frequencies
/// keep the plain calendar result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RollConvention {
    /// Keep the day of the effective date, clamped to the month length.
    #[default]
    None,
    /// Always roll to the last day of the month.
    EndOfMonth,
    /// Roll to a fixed day, clamped to the month length.
    DayOfMonth(u32),
    /// Roll to the third Wednesday of the month.
    Imm,
}

impl RollConvention {
    /// Applies the roll to a date that has just been advanced by a period.
    pub fn apply(&self, date: Date) -> CashflowResult<Date> {
        match *self {
            RollConvention::None => Ok(date),
            RollConvention::EndOfMonth => Ok(date.end_of_month()),
            RollConvention::DayOfMonth(day) => {
                if !(1..=31).contains(&day) {
                    return Err(CashflowError::InvalidRollDay { day });
                }
                Ok(date.with_day_clamped(day)?)
            }
            RollConvention::Imm => Ok(Date::nth_weekday_of_month(
                date.year(),
                date.month(),
                Weekday::Wed,
                3,
            )?),
        }
    }
}

impl fmt::Display for RollConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollConvention::None => write!(f, "NONE"),
            RollConvention::EndOfMonth => write!(f, "EOM"),
            RollConvention::DayOfMonth(day) => write!(f, "{day}"),
            RollConvention::Imm => write!(f, "IMM"),
        }
    }
}

impl FromStr for RollConvention {
    type Err = TenorError;

    /// Parses `NONE`, `EOM`, `IMM` or a day number such as `15`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "NONE" => Ok(RollConvention::None),
            "EOM" | "ENDOFMONTH" => Ok(RollConvention::EndOfMonth),
            "IMM" => Ok(RollConvention::Imm),
            other => other
                .parse::<u32>()
                .map(RollConvention::DayOfMonth)
                .map_err(|_| TenorError::unsupported("roll convention", s)),
        }
    }
}

/// One accrual period of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationPeriod {
    /// Business-day adjusted start.
    pub adjusted_start: Date,
    /// Business-day adjusted end.
    pub adjusted_end: Date,
    /// Start before adjustment.
    pub unadjusted_start: Date,
    /// End before adjustment.
    pub unadjusted_end: Date,
    /// Calendar days between the adjusted boundaries.
    pub calendar_days: u64,
    /// True for a flagged front or back stub.
    pub is_stub: bool,
}

impl CalculationPeriod {
    /// Returns true if the date lies within the adjusted boundaries (inclusive).
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.adjusted_start <= date && date <= self.adjusted_end
    }
}

/// Inputs for schedule generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleParams {
    /// First accrual date.
    pub effective_date: Date,
    /// Last accrual date.
    pub termination_date: Date,
    /// Distance between regular period boundaries.
    pub frequency: Period,
    /// Day-of-month rule applied after each period is added.
    #[serde(default)]
    pub roll_convention: RollConvention,
    /// Which boundary periods are flagged as stubs.
    #[serde(default)]
    pub stub_type: StubType,
    /// Business day adjustment for every boundary.
    #[serde(default)]
    pub adjustments: BusinessDayAdjustments,
}

impl ScheduleParams {
    /// Creates parameters with no roll, no stub and no adjustment.
    #[must_use]
    pub fn new(effective_date: Date, termination_date: Date, frequency: Period) -> Self {
        Self {
            effective_date,
            termination_date,
            frequency,
            roll_convention: RollConvention::None,
            stub_type: StubType::None,
            adjustments: BusinessDayAdjustments::unadjusted(),
        }
    }

    /// Sets the roll convention.
    #[must_use]
    pub fn with_roll_convention(mut self, roll: RollConvention) -> Self {
        self.roll_convention = roll;
        self
    }

    /// Sets the stub type.
    #[must_use]
    pub fn with_stub_type(mut self, stub_type: StubType) -> Self {
        self.stub_type = stub_type;
        self
    }

    /// Sets the business day adjustments.
    #[must_use]
    pub fn with_adjustments(mut self, adjustments: BusinessDayAdjustments) -> Self {
        self.adjustments = adjustments;
        self
    }
}

/// A generated schedule of calculation periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    frequency: Period,
    unadjusted_dates: Vec<Date>,
    adjusted_dates: Vec<Date>,
    periods: Vec<CalculationPeriod>,
}

impl Schedule {
    /// Returns the calculation periods.
    #[must_use]
    pub fn periods(&self) -> &[CalculationPeriod] {
        &self.periods
    }

    /// Returns the unadjusted boundary dates.
    #[must_use]
    pub fn unadjusted_dates(&self) -> &[Date] {
        &self.unadjusted_dates
    }

    /// Returns the adjusted boundary dates.
    #[must_use]
    pub fn adjusted_dates(&self) -> &[Date] {
        &self.adjusted_dates
    }

    /// Returns the generating frequency.
    #[must_use]
    pub fn frequency(&self) -> Period {
        self.frequency
    }

    /// Returns the number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Returns true if the schedule has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Returns the final adjusted date.
    #[must_use]
    pub fn termination_date(&self) -> Option<Date> {
        self.adjusted_dates.last().copied()
    }
}

/// Generates calculation period schedules under configurable limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleGenerator {
    limits: EngineLimits,
}

impl ScheduleGenerator {
    /// Creates a generator with the given limits.
    #[must_use]
    pub fn new(limits: EngineLimits) -> Self {
        Self { limits }
    }

    /// Generates the schedule.
    ///
    /// Boundary `k` is `effective + k * frequency` with the roll convention
    /// applied, which keeps month-end clamping from drifting. Generation stops
    /// before any boundary on or after the termination date, which is then
    /// appended as the final boundary.
    ///
    /// # Errors
    ///
    /// - `InvalidDates` if termination is not after effective
    /// - `InvalidFrequency` for a zero multiplier
    /// - `InvalidRollDay` for a day-of-month roll outside 1-31
    /// - `TooManyPeriods` if the schedule exceeds the configured ceiling
    pub fn generate(&self, params: &ScheduleParams) -> CashflowResult<Schedule> {
        let effective = params.effective_date;
        let termination = params.termination_date;

        if termination <= effective {
            return Err(CashflowError::invalid_dates(effective, termination));
        }
        if params.frequency.is_zero() {
            return Err(CashflowError::invalid_frequency(format!(
                "{} has a zero multiplier",
                params.frequency
            )));
        }
        if let RollConvention::DayOfMonth(day) = params.roll_convention {
            if !(1..=31).contains(&day) {
                return Err(CashflowError::InvalidRollDay { day });
            }
        }

        let unadjusted = self.unadjusted_boundaries(params)?;
        let adjusted = unadjusted
            .iter()
            .map(|&date| params.adjustments.apply(date))
            .collect::<Result<Vec<_>, _>>()?;

        let last = unadjusted.len() - 2;
        let mut periods = Vec::with_capacity(unadjusted.len() - 1);
        for i in 0..=last {
            let (adjusted_start, adjusted_end) = (adjusted[i], adjusted[i + 1]);
            if adjusted_end < adjusted_start {
                return Err(CashflowError::invalid_schedule(format!(
                    "adjusted period {adjusted_start} to {adjusted_end} is reversed"
                )));
            }
            let is_stub = (i == 0 && params.stub_type.is_front_stub())
                || (i == last && params.stub_type.is_back_stub());
            periods.push(CalculationPeriod {
                adjusted_start,
                adjusted_end,
                unadjusted_start: unadjusted[i],
                unadjusted_end: unadjusted[i + 1],
                calendar_days: adjusted_start.days_between(adjusted_end)?,
                is_stub,
            });
        }

        debug!(
            "generated {} periods from {effective} to {termination} every {}",
            periods.len(),
            params.frequency
        );

        Ok(Schedule {
            frequency: params.frequency,
            unadjusted_dates: unadjusted,
            adjusted_dates: adjusted,
            periods,
        })
    }

    fn unadjusted_boundaries(&self, params: &ScheduleParams) -> CashflowResult<Vec<Date>> {
        let effective = params.effective_date;
        let termination = params.termination_date;
        let limit = self.limits.max_periods;
        let rolls = matches!(params.frequency.unit, TimeUnit::Month | TimeUnit::Year);

        let mut dates = vec![effective];
        let mut k: u32 = 1;
        loop {
            let step = params
                .frequency
                .multiplier
                .checked_mul(k)
                .ok_or_else(|| CashflowError::TooManyPeriods { limit })?;
            let raw = match effective.add_period(Period::new(step, params.frequency.unit)) {
                Ok(date) => date,
                // Beyond 9999-12-31, so also beyond termination
                Err(TenorError::InvalidDate { .. }) => break,
                Err(e) => return Err(e.into()),
            };
            let next = if rolls {
                params.roll_convention.apply(raw)?
            } else {
                raw
            };

            if next >= termination {
                break;
            }
            // A roll can pull a boundary back onto or before its predecessor
            if dates.last().map_or(true, |&prev| next > prev) {
                dates.push(next);
                if dates.len() > limit {
                    warn!("schedule from {effective} to {termination} exceeds {limit} periods");
                    return Err(CashflowError::TooManyPeriods { limit });
                }
            }
            k += 1;
        }

        dates.push(termination);
        Ok(dates)
    }
}
