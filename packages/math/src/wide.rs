// SPDX-License-Identifier: MIT
// Wide Integer Helpers
//
// All intermediate products are taken in U512 so that a product of three
// 18-decimal magnitudes never wraps before the final division.

use primitive_types::{U256, U512};

use crate::error::MathError;

/// 10^18, the scale of `Dec`
pub fn dec_scale() -> U256 {
    U256::from(1_000_000_000_000_000_000u128)
}

/// 10^36, the scale of `BigDec`
pub fn big_scale() -> U512 {
    U512::from(1_000_000_000_000_000_000_000_000_000_000_000_000u128)
}

/// Split a U256 into (hi, lo) u128 halves.
pub fn to_limbs(value: U256) -> (u128, u128) {
    let w = value.0;
    let lo = (w[0] as u128) | ((w[1] as u128) << 64);
    let hi = (w[2] as u128) | ((w[3] as u128) << 64);
    (hi, lo)
}

/// Rebuild a U256 from (hi, lo) u128 halves.
pub fn from_limbs(hi: u128, lo: u128) -> U256 {
    U256([lo as u64, (lo >> 64) as u64, hi as u64, (hi >> 64) as u64])
}

pub fn narrow(value: U512) -> Result<U256, MathError> {
    U256::try_from(value).map_err(|_| MathError::Overflow)
}

pub fn checked_mul(a: U512, b: U512) -> Result<U512, MathError> {
    a.checked_mul(b).ok_or(MathError::Overflow)
}

pub fn checked_add(a: U512, b: U512) -> Result<U512, MathError> {
    a.checked_add(b).ok_or(MathError::Overflow)
}

/// floor(a * b / denominator)
pub fn mul_div_floor(a: U512, b: U512, denominator: U512) -> Result<U512, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    Ok(checked_mul(a, b)? / denominator)
}

/// ceil(a * b / denominator)
pub fn mul_div_ceil(a: U512, b: U512, denominator: U512) -> Result<U512, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let product = checked_mul(a, b)?;
    let quotient = product / denominator;
    if (product % denominator).is_zero() {
        Ok(quotient)
    } else {
        checked_add(quotient, U512::one())
    }
}

/// ceil(numerator / denominator)
pub fn div_ceil(numerator: U512, denominator: U512) -> Result<U512, MathError> {
    mul_div_ceil(numerator, U512::one(), denominator)
}
