// SPDX-License-Identifier: MIT
// Extended-Precision Decimal (36 decimals, unsigned)

use primitive_types::{U256, U512};

use crate::dec::Dec;
use crate::error::MathError;
use crate::wide::{big_scale, checked_add, checked_mul, dec_scale, div_ceil, mul_div_ceil, narrow};

/// Unsigned decimal with 36 fractional digits.
///
/// Used only inside a computation (price ladder, amount deltas); results are
/// narrowed back to `Dec` before they are stored anywhere.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct BigDec(U512);

impl BigDec {
    pub fn zero() -> Self {
        Self(U512::zero())
    }

    pub fn one() -> Self {
        Self(big_scale())
    }

    /// Wrap an already-scaled 36-decimal integer.
    pub fn from_raw(raw: U512) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> U512 {
        self.0
    }

    pub fn from_dec(value: &Dec) -> Result<Self, MathError> {
        if value.is_negative() {
            return Err(MathError::NegativeResult);
        }
        Ok(Self(U512::from(value.magnitude()) * U512::from(dec_scale())))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self, MathError> {
        Ok(Self(checked_add(self.0, other.0)?))
    }

    pub fn checked_sub(&self, other: &Self) -> Result<Self, MathError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(MathError::NegativeResult)
    }

    /// floor(a * b) at 36 decimals.
    ///
    /// The full product of two 512-bit magnitudes does not fit U512, so the
    /// left operand is split at the scale: floor(a*b/k) = (a/k)*b + floor((a%k)*b/k).
    pub fn mul_trunc(&self, other: &Self) -> Result<Self, MathError> {
        let k = big_scale();
        let whole = checked_mul(self.0 / k, other.0)?;
        let frac = checked_mul(self.0 % k, other.0)? / k;
        Ok(Self(checked_add(whole, frac)?))
    }

    /// ceil(a * b) at 36 decimals.
    pub fn mul_round_up(&self, other: &Self) -> Result<Self, MathError> {
        let k = big_scale();
        let whole = checked_mul(self.0 / k, other.0)?;
        let frac = mul_div_ceil(self.0 % k, other.0, k)?;
        Ok(Self(checked_add(whole, frac)?))
    }

    /// floor(a / b) at 36 decimals.
    pub fn quo_trunc(&self, other: &Self) -> Result<Self, MathError> {
        if other.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(Self(checked_mul(self.0, big_scale())? / other.0))
    }

    /// ceil(a / b) at 36 decimals.
    pub fn quo_round_up(&self, other: &Self) -> Result<Self, MathError> {
        Ok(Self(mul_div_ceil(self.0, big_scale(), other.0)?))
    }

    /// Narrow to `Dec`, truncating the extra 18 digits.
    pub fn to_dec(&self) -> Result<Dec, MathError> {
        let raw: U256 = narrow(self.0 / U512::from(dec_scale()))?;
        Ok(Dec::from_raw(false, raw))
    }

    /// Narrow to `Dec`, rounding the extra 18 digits up.
    pub fn to_dec_round_up(&self) -> Result<Dec, MathError> {
        let raw = narrow(div_ceil(self.0, U512::from(dec_scale()))?)?;
        Ok(Dec::from_raw(false, raw))
    }
}
