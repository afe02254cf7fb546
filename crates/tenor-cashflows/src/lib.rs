//! # Tenor Cashflows
//!
//! Schedule generation, floating-rate observation, compounding and cashflow
//! calculation for the Tenor interest calculation engine.
//!
//! - **Schedules**: [`ScheduleGenerator`] builds adjusted calculation periods
//! - **Observations**: [`ObservationScheduleGenerator`] lays out rate fixings
//! - **Compounding**: [`CompoundingMethod`] combines observed rates
//! - **Interest**: fixed and floating interest, accrual and leg cashflows
//! - **Cashflows**: present value, NPV, netting and payment rounding
//!
//! ## Example
//!
//! ```rust
//! use tenor_cashflows::prelude::*;
//! use tenor_core::prelude::*;
//! use tenor_math::FixedPoint;
//!
//! let params = ScheduleParams::new(
//!     Date::from_ymd(2025, 1, 15).unwrap(),
//!     Date::from_ymd(2026, 1, 15).unwrap(),
//!     Period::months(6),
//! );
//! let schedule = ScheduleGenerator::default().generate(&params).unwrap();
//!
//! let leg = LegTerms::new(
//!     "1000000".parse().unwrap(),
//!     AccrualBasis::new(DayCountConvention::Thirty360),
//!     Direction::Receive,
//!     Currency::USD,
//! );
//! let rate: FixedPoint = "0.05".parse().unwrap();
//! let flows = build_cashflows(&schedule, &leg, rate).unwrap();
//! assert_eq!(flows[0].amount.to_string(), "25000");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]

pub mod cashflow;
pub mod compounding;
pub mod error;
pub mod interest;
pub mod observation;
pub mod schedule;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflow::{
        build_cashflows, build_floating_cashflows, net, npv, present_value, round_payment,
        CashflowKind, CashflowRecord, Currency, Direction, LegTerms, NettedCashflow,
        DEFAULT_PAYMENT_PRECISION,
    };
    pub use crate::compounding::{compound, CompoundingMethod, RateObservation};
    pub use crate::error::{CashflowError, CashflowResult};
    pub use crate::interest::{
        accrued_interest, fixed_interest, floating_interest, floating_rate, period_interest,
        AccrualBasis, FloatingRateTerms,
    };
    pub use crate::observation::{
        Observation, ObservationConfig, ObservationMethod, ObservationScheduleGenerator,
        ShiftUnit,
    };
    pub use crate::schedule::{
        CalculationPeriod, RollConvention, Schedule, ScheduleGenerator, ScheduleParams, StubType,
    };
}

pub use compounding::CompoundingMethod;
pub use error::{CashflowError, CashflowResult};
pub use observation::ObservationScheduleGenerator;
pub use schedule::{Schedule, ScheduleGenerator, ScheduleParams};
