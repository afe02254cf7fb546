//! Cashflow records, discounting and netting.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use tenor_core::types::Date;
use tenor_core::TenorError;
use tenor_math::{FixedPoint, SignedFixed};

use crate::error::{CashflowError, CashflowResult};
use crate::interest::{period_interest, AccrualBasis};
use crate::schedule::Schedule;

/// Default payment rounding: cents.
pub const DEFAULT_PAYMENT_PRECISION: FixedPoint = FixedPoint::from_raw(10_000_000_000_000_000);

/// Three-letter currency code, stored as uppercase ASCII bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Currency([u8; 3]);

impl Currency {
    /// US dollar.
    pub const USD: Self = Self(*b"USD");
    /// Euro.
    pub const EUR: Self = Self(*b"EUR");
    /// Pound sterling.
    pub const GBP: Self = Self(*b"GBP");
    /// Japanese yen.
    pub const JPY: Self = Self(*b"JPY");

    /// Returns the raw code bytes.
    #[must_use]
    pub const fn code(&self) -> [u8; 3] {
        self.0
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII letters
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = CashflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        match bytes {
            [a, b, c] if bytes.iter().all(u8::is_ascii_alphabetic) => Ok(Self([
                a.to_ascii_uppercase(),
                b.to_ascii_uppercase(),
                c.to_ascii_uppercase(),
            ])),
            _ => Err(CashflowError::InvalidCurrency {
                code: s.to_string(),
            }),
        }
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// What a cashflow pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashflowKind {
    /// Interest at a fixed rate.
    FixedInterest,
    /// Interest at a floating rate.
    FloatingInterest,
    /// Principal exchange.
    Notional,
}

impl fmt::Display for CashflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashflowKind::FixedInterest => "Fixed",
            CashflowKind::FloatingInterest => "Floating",
            CashflowKind::Notional => "Notional",
        };
        write!(f, "{name}")
    }
}

/// Whether the holder pays or receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Outgoing.
    Pay,
    /// Incoming.
    Receive,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Pay => write!(f, "Pay"),
            Direction::Receive => write!(f, "Receive"),
        }
    }
}

impl FromStr for Direction {
    type Err = CashflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pay" | "payer" => Ok(Direction::Pay),
            "receive" | "receiver" | "rec" => Ok(Direction::Receive),
            _ => Err(TenorError::unsupported("direction", s).into()),
        }
    }
}

/// A single dated payment.
///
/// `amount` is always non-negative; `direction` carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowRecord {
    /// Gross amount.
    pub amount: FixedPoint,
    /// Settlement date.
    pub payment_date: Date,
    /// Accrual start.
    pub period_start: Date,
    /// Accrual end.
    pub period_end: Date,
    /// Cashflow type.
    pub kind: CashflowKind,
    /// Pay or receive.
    pub direction: Direction,
    /// Settlement currency.
    pub currency: Currency,
    /// True if the amount was fixed at inception.
    pub is_fixed: bool,
}

impl CashflowRecord {
    /// Amount signed by direction, receive positive.
    pub fn signed_amount(&self) -> CashflowResult<SignedFixed> {
        let value = SignedFixed::from_fixed(self.amount)?;
        Ok(match self.direction {
            Direction::Receive => value,
            Direction::Pay => SignedFixed::ZERO.checked_sub(value)?,
        })
    }
}

/// Result of netting two cashflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NettedCashflow {
    /// Net amount, receive positive.
    pub amount: SignedFixed,
    /// Shared payment date.
    pub payment_date: Date,
    /// Shared currency.
    pub currency: Currency,
    /// Direction of the larger gross flow.
    pub direction: Direction,
}

/// `amount × discount_factor`.
pub fn present_value(amount: FixedPoint, discount_factor: FixedPoint) -> CashflowResult<FixedPoint> {
    Ok(amount.checked_mul(discount_factor)?)
}

/// Sum of present values.
///
/// Amounts are summed gross; direction is not applied.
pub fn npv(cashflows: &[CashflowRecord], discount_factors: &[FixedPoint]) -> CashflowResult<FixedPoint> {
    if cashflows.len() != discount_factors.len() {
        return Err(CashflowError::length_mismatch(
            cashflows.len(),
            discount_factors.len(),
        ));
    }
    cashflows
        .iter()
        .zip(discount_factors)
        .try_fold(FixedPoint::ZERO, |acc, (cf, df)| {
            Ok(acc.checked_add(present_value(cf.amount, *df)?)?)
        })
}

/// Nets two same-date, same-currency cashflows.
///
/// Ties keep the direction of `a`.
pub fn net(a: &CashflowRecord, b: &CashflowRecord) -> CashflowResult<NettedCashflow> {
    if a.currency != b.currency {
        return Err(CashflowError::CurrencyMismatch {
            left: a.currency,
            right: b.currency,
        });
    }
    if a.payment_date != b.payment_date {
        return Err(CashflowError::PaymentDateMismatch {
            left: a.payment_date,
            right: b.payment_date,
        });
    }

    let amount = a.signed_amount()?.checked_add(b.signed_amount()?)?;
    let direction = if b.amount > a.amount {
        b.direction
    } else {
        a.direction
    };
    Ok(NettedCashflow {
        amount,
        payment_date: a.payment_date,
        currency: a.currency,
        direction,
    })
}

/// Rounds half-up to a multiple of `precision`.
pub fn round_payment(amount: FixedPoint, precision: FixedPoint) -> CashflowResult<FixedPoint> {
    Ok(amount.round_to_increment(precision)?)
}

/// Static terms of one leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegTerms {
    /// Principal.
    pub notional: FixedPoint,
    /// Accrual basis for every period.
    pub basis: AccrualBasis,
    /// Pay or receive.
    pub direction: Direction,
    /// Settlement currency.
    pub currency: Currency,
    /// Payment rounding; `None` leaves amounts unrounded.
    pub payment_precision: Option<FixedPoint>,
}

impl LegTerms {
    /// Creates terms rounded to [`DEFAULT_PAYMENT_PRECISION`].
    #[must_use]
    pub fn new(
        notional: FixedPoint,
        basis: AccrualBasis,
        direction: Direction,
        currency: Currency,
    ) -> Self {
        Self {
            notional,
            basis,
            direction,
            currency,
            payment_precision: Some(DEFAULT_PAYMENT_PRECISION),
        }
    }

    /// Sets or clears the payment rounding.
    #[must_use]
    pub fn with_payment_precision(mut self, precision: Option<FixedPoint>) -> Self {
        self.payment_precision = precision;
        self
    }

    fn record(
        &self,
        schedule: &Schedule,
        index: usize,
        rate: FixedPoint,
        kind: CashflowKind,
    ) -> CashflowResult<CashflowRecord> {
        let period = &schedule.periods()[index];
        let mut amount = period_interest(self.notional, rate, period, &self.basis)?;
        if let Some(precision) = self.payment_precision {
            amount = round_payment(amount, precision)?;
        }
        Ok(CashflowRecord {
            amount,
            payment_date: period.adjusted_end,
            period_start: period.adjusted_start,
            period_end: period.adjusted_end,
            kind,
            direction: self.direction,
            currency: self.currency,
            is_fixed: kind == CashflowKind::FixedInterest,
        })
    }
}

/// Builds fixed-rate interest cashflows, one per schedule period.
///
/// Payment falls on the adjusted period end.
pub fn build_cashflows(
    schedule: &Schedule,
    leg: &LegTerms,
    rate: FixedPoint,
) -> CashflowResult<Vec<CashflowRecord>> {
    let flows = (0..schedule.len())
        .map(|i| leg.record(schedule, i, rate, CashflowKind::FixedInterest))
        .collect::<CashflowResult<Vec<_>>>()?;
    debug!("built {} fixed cashflows at {rate}", flows.len());
    Ok(flows)
}

/// Builds floating-rate interest cashflows from one effective rate per period.
///
/// # Errors
///
/// Returns `CashflowError::LengthMismatch` unless there is exactly one rate
/// per period.
pub fn build_floating_cashflows(
    schedule: &Schedule,
    leg: &LegTerms,
    period_rates: &[FixedPoint],
) -> CashflowResult<Vec<CashflowRecord>> {
    if period_rates.len() != schedule.len() {
        return Err(CashflowError::length_mismatch(
            schedule.len(),
            period_rates.len(),
        ));
    }
    let flows = period_rates
        .iter()
        .enumerate()
        .map(|(i, rate)| leg.record(schedule, i, *rate, CashflowKind::FloatingInterest))
        .collect::<CashflowResult<Vec<_>>>()?;
    debug!("built {} floating cashflows", flows.len());
    Ok(flows)
}
