use crate::error::{ReconcileError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest number of decimal places a quantity field may be rounded to.
pub const MAX_PRECISION: u32 = 9;

/// How a quantity is brought to its field precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingRule {
    /// Midpoints move away from zero: `10.005` becomes `10.01` at precision 2.
    #[default]
    HalfUp,
    /// Banker's rounding: `10.005` becomes `10.00` at precision 2.
    HalfEven,
    /// Extra digits are dropped.
    Truncate,
}

impl RoundingRule {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingRule::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingRule::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingRule::Truncate => RoundingStrategy::ToZero,
        }
    }
}

impl FromStr for RoundingRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half-up" | "half_up" => Ok(RoundingRule::HalfUp),
            "half-even" | "half_even" | "bankers" => Ok(RoundingRule::HalfEven),
            "truncate" | "floor" => Ok(RoundingRule::Truncate),
            other => Err(format!("unknown rounding rule '{other}'")),
        }
    }
}

impl fmt::Display for RoundingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingRule::HalfUp => "half-up",
            RoundingRule::HalfEven => "half-even",
            RoundingRule::Truncate => "truncate",
        };
        f.write_str(name)
    }
}

/// A non-negative stock quantity.
///
/// Wraps `rust_decimal::Decimal` so that comparisons after rounding are exact
/// and never suffer from binary floating-point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(ReconcileError::ValidationError(format!(
                "Quantity must not be negative, got {value}"
            )))
        }
    }

    /// Builds a quantity from an optional cell, treating a missing value as zero.
    pub fn from_optional(value: Option<Decimal>) -> Result<Self> {
        value.map_or(Ok(Self::ZERO), Self::new)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn round(self, precision: u32, rule: RoundingRule) -> Self {
        Self(self.0.round_dp_with_strategy(precision, rule.strategy()))
    }

    /// Multiplies by a non-negative factor, e.g. a unit conversion factor.
    pub fn scaled(self, factor: Decimal) -> Self {
        Self(self.0.saturating_mul(factor.max(Decimal::ZERO)))
    }

    /// Difference of two quantities, or `None` when `rhs` is the larger one.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        (self >= rhs).then(|| Self(self.0 - rhs.0))
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = ReconcileError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
