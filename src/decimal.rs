//! Exact fixed-point monetary amounts.
//!
//! Wraps `rust_decimal` and exposes only checked arithmetic, so that a sum
//! which would overflow or be rounded is reported instead of silently lossy.

use crate::error::{ArithmeticError, Operation};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fractional digits kept by [`Amount::checked_div_count`].
pub const QUOTIENT_SCALE: u32 = 12;

/// A signed monetary amount with explicit scale tracking.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use account_summary::Amount;
///
/// let a = Amount::from_str("10.50").unwrap();
/// let b = Amount::from_str("-0.25").unwrap();
/// assert_eq!(a.checked_add(b).unwrap().to_string(), "10.25");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Amount(value)
    }

    /// Returns the underlying decimal.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero (including negative zero).
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` for strictly positive amounts.
    ///
    /// Zero is not a credit.
    pub fn is_credit(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Adds `rhs`, failing if the result overflows or would have to be rounded.
    pub fn checked_add(self, rhs: Self) -> Result<Self, ArithmeticError> {
        let sum = self
            .0
            .checked_add(rhs.0)
            .ok_or(ArithmeticError::Overflow {
                operation: Operation::Add,
                lhs: self,
                rhs,
            })?;

        // rust_decimal rescales instead of failing when the exact sum needs
        // more than 96 bits of mantissa.
        if !is_exact_sum(self.0, rhs.0, sum) {
            return Err(ArithmeticError::Inexact {
                operation: Operation::Add,
                lhs: self,
                rhs,
            });
        }

        Ok(Amount(sum))
    }

    /// Divides by a transaction count, keeping [`QUOTIENT_SCALE`] fractional digits.
    pub fn checked_div_count(self, count: usize) -> Result<Self, ArithmeticError> {
        if count == 0 {
            return Err(ArithmeticError::DivisionByZero { lhs: self });
        }

        let divisor = Decimal::from(count as u64);
        let quotient = self
            .0
            .checked_div(divisor)
            .ok_or(ArithmeticError::Overflow {
                operation: Operation::Divide,
                lhs: self,
                rhs: Amount(divisor),
            })?;

        Ok(Amount(quotient.round_dp(QUOTIENT_SCALE)))
    }
}

/// Compares `sum` against `lhs + rhs` computed on `i128` mantissas aligned to
/// the finer of the two scales.
///
/// Operands are normalized first so trailing zeros do not widen the scale. If
/// an aligned mantissa does not fit `i128`, the exact sum cannot fit the 96-bit
/// mantissa at that scale either, so `sum` was rounded.
fn is_exact_sum(lhs: Decimal, rhs: Decimal, sum: Decimal) -> bool {
    let (lhs, rhs, sum) = (lhs.normalize(), rhs.normalize(), sum.normalize());
    let scale = lhs.scale().max(rhs.scale());
    if sum.scale() > scale {
        return false;
    }

    let aligned = |d: Decimal| {
        10i128
            .checked_pow(scale - d.scale())
            .and_then(|factor| d.mantissa().checked_mul(factor))
    };

    match (aligned(lhs), aligned(rhs), aligned(sum)) {
        (Some(l), Some(r), Some(s)) => l.checked_add(r) == Some(s),
        _ => false,
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}
