//! Decimal rounding for fixed-point values.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::fixed::{FixedPoint, DECIMALS};

/// Rounding policy applied when discarding decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Truncate toward zero.
    Down,
    /// Round away from zero whenever anything is discarded.
    Up,
    /// Round to the nearest value; halves round up.
    #[default]
    Nearest,
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoundingMode::Down => "Down",
            RoundingMode::Up => "Up",
            RoundingMode::Nearest => "Nearest",
        };
        write!(f, "{name}")
    }
}

impl FixedPoint {
    /// Rounds to `places` decimal places using the given mode.
    ///
    /// Requests for 18 or more places return the value unchanged.
    pub fn round_dp(self, places: u32, mode: RoundingMode) -> MathResult<Self> {
        if places >= DECIMALS {
            return Ok(self);
        }
        let unit = 10u128.pow(DECIMALS - places);
        round_to_unit(self.raw(), unit, mode).map(Self::from_raw)
    }

    /// Rounds half-up to the nearest multiple of `increment`.
    ///
    /// `increment` is itself a fixed-point value, so `0.01` rounds to cents.
    pub fn round_to_increment(self, increment: Self) -> MathResult<Self> {
        if increment.is_zero() {
            return Err(MathError::division_by_zero("round to increment"));
        }
        round_to_unit(self.raw(), increment.raw(), RoundingMode::Nearest).map(Self::from_raw)
    }
}

fn round_to_unit(raw: u128, unit: u128, mode: RoundingMode) -> MathResult<u128> {
    let remainder = raw % unit;
    let floor = raw - remainder;
    if remainder == 0 {
        return Ok(raw);
    }

    let round_up = match mode {
        RoundingMode::Down => false,
        RoundingMode::Up => true,
        RoundingMode::Nearest => remainder >= unit - remainder,
    };

    if round_up {
        floor
            .checked_add(unit)
            .ok_or_else(|| MathError::overflow("round"))
    } else {
        Ok(floor)
    }
}
