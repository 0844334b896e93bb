// SPDX-License-Identifier: MIT
// Fixed-Point Decimal (18 decimals, signed)

use core::cmp::Ordering;

use primitive_types::{U256, U512};
use soroban_sdk::contracttype;

use crate::error::MathError;
use crate::wide::{dec_scale, div_ceil, from_limbs, mul_div_ceil, mul_div_floor, narrow, to_limbs};

/// Number of fractional digits carried by `Dec`
pub const DEC_PRECISION: u32 = 18;

/// Signed fixed-point decimal with 18 fractional digits.
///
/// The magnitude is a 256-bit integer split into two u128 halves so the
/// value can be stored as a contract type. Every constructor stores zero
/// with a cleared sign; a value decoded from outside the contract may
/// still carry a negative zero, so equality and ordering compare the
/// canonical value rather than the raw fields.
///
/// Rounding helpers operate on the magnitude: `*_round_up` rounds away
/// from zero, the plain variants truncate toward zero.
#[contracttype]
#[derive(Clone, Copy, Debug)]
pub struct Dec {
    neg: bool,
    hi: u128,
    lo: u128,
}

impl Default for Dec {
    fn default() -> Self {
        Self::zero()
    }
}

impl Dec {
    // ============================================================
    // CONSTRUCTION
    // ============================================================

    pub const fn zero() -> Self {
        Self { neg: false, hi: 0, lo: 0 }
    }

    pub const fn one() -> Self {
        Self { neg: false, hi: 0, lo: 1_000_000_000_000_000_000 }
    }

    /// Build from a sign and the two halves of a raw magnitude.
    pub fn from_parts(neg: bool, hi: u128, lo: u128) -> Self {
        Self { neg: neg && (hi != 0 || lo != 0), hi, lo }
    }

    /// Same value with a cleared sign on zero
    pub fn canonical(&self) -> Self {
        Self::from_parts(self.neg, self.hi, self.lo)
    }

    /// Build from a sign and a raw (already scaled) magnitude.
    pub fn from_raw(neg: bool, magnitude: U256) -> Self {
        let (hi, lo) = to_limbs(magnitude);
        Self { neg: neg && !magnitude.is_zero(), hi, lo }
    }

    /// Raw scaled magnitude (value * 10^18, unsigned)
    pub fn magnitude(&self) -> U256 {
        from_limbs(self.hi, self.lo)
    }

    /// Whole-number value.
    pub fn from_int(value: i128) -> Self {
        let magnitude = U256::from(value.unsigned_abs()) * dec_scale();
        Self::from_raw(value < 0, magnitude)
    }

    /// `value / 10^decimals`, e.g. `from_atomics(70_710678, 6) == 70.710678`.
    /// Digits beyond 18 decimals are truncated.
    pub fn from_atomics(value: i128, decimals: u32) -> Result<Self, MathError> {
        let base = U512::from(value.unsigned_abs());
        let raw = if decimals <= DEC_PRECISION {
            base * U512::exp10((DEC_PRECISION - decimals) as usize)
        } else {
            if decimals > 76 {
                return Err(MathError::Overflow);
            }
            base / U512::exp10((decimals - DEC_PRECISION) as usize)
        };
        Ok(Self::from_raw(value < 0, narrow(raw)?))
    }

    /// Parse a plain decimal literal such as `"-70.468932817327539027"`.
    /// Fractional digits beyond 18 are rejected rather than rounded.
    pub fn from_decimal_str(text: &str) -> Result<Self, MathError> {
        let bytes = text.as_bytes();
        let (neg, digits) = match bytes.first() {
            Some(b'-') => (true, &bytes[1..]),
            Some(_) => (false, bytes),
            None => return Err(MathError::InvalidDecimal),
        };

        let mut raw = U256::zero();
        let mut fraction_digits: Option<u32> = None;
        let mut seen_digit = false;
        for &c in digits {
            match c {
                b'.' if fraction_digits.is_none() => fraction_digits = Some(0),
                b'0'..=b'9' => {
                    if let Some(count) = fraction_digits.as_mut() {
                        if *count == DEC_PRECISION {
                            return Err(MathError::InvalidDecimal);
                        }
                        *count += 1;
                    }
                    raw = raw
                        .checked_mul(U256::from(10u8))
                        .and_then(|r| r.checked_add(U256::from(c - b'0')))
                        .ok_or(MathError::Overflow)?;
                    seen_digit = true;
                }
                _ => return Err(MathError::InvalidDecimal),
            }
        }
        if !seen_digit {
            return Err(MathError::InvalidDecimal);
        }

        let pad = DEC_PRECISION - fraction_digits.unwrap_or(0);
        let raw = raw
            .checked_mul(U256::exp10(pad as usize))
            .ok_or(MathError::Overflow)?;
        Ok(Self::from_raw(neg, raw))
    }

    // ============================================================
    // PREDICATES
    // ============================================================

    pub fn is_zero(&self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    pub fn is_negative(&self) -> bool {
        self.neg && !self.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        !self.neg && !self.is_zero()
    }

    // ============================================================
    // SIGN
    // ============================================================

    pub fn neg(&self) -> Self {
        Self::from_raw(!self.neg, self.magnitude())
    }

    pub fn abs(&self) -> Self {
        Self::from_raw(false, self.magnitude())
    }

    // ============================================================
    // ARITHMETIC
    // ============================================================

    pub fn checked_add(&self, other: &Self) -> Result<Self, MathError> {
        let a = self.magnitude();
        let b = other.magnitude();
        if self.is_negative() == other.is_negative() {
            let sum = a.checked_add(b).ok_or(MathError::Overflow)?;
            return Ok(Self::from_raw(self.is_negative(), sum));
        }
        // Opposite signs: the larger magnitude decides the sign.
        if a >= b {
            Ok(Self::from_raw(self.is_negative(), a - b))
        } else {
            Ok(Self::from_raw(other.is_negative(), b - a))
        }
    }

    pub fn checked_sub(&self, other: &Self) -> Result<Self, MathError> {
        self.checked_add(&other.neg())
    }

    /// Subtraction that must stay non-negative.
    pub fn checked_sub_non_negative(&self, other: &Self) -> Result<Self, MathError> {
        let result = self.checked_sub(other)?;
        if result.is_negative() {
            return Err(MathError::NegativeResult);
        }
        Ok(result)
    }

    fn sign_of_product(&self, other: &Self) -> bool {
        self.is_negative() != other.is_negative()
    }

    /// Product truncated toward zero.
    pub fn mul(&self, other: &Self) -> Result<Self, MathError> {
        let raw = mul_div_floor(
            U512::from(self.magnitude()),
            U512::from(other.magnitude()),
            U512::from(dec_scale()),
        )?;
        Ok(Self::from_raw(self.sign_of_product(other), narrow(raw)?))
    }

    /// Product rounded away from zero.
    pub fn mul_round_up(&self, other: &Self) -> Result<Self, MathError> {
        let raw = mul_div_ceil(
            U512::from(self.magnitude()),
            U512::from(other.magnitude()),
            U512::from(dec_scale()),
        )?;
        Ok(Self::from_raw(self.sign_of_product(other), narrow(raw)?))
    }

    /// Quotient truncated toward zero.
    pub fn quo(&self, other: &Self) -> Result<Self, MathError> {
        let raw = mul_div_floor(
            U512::from(self.magnitude()),
            U512::from(dec_scale()),
            U512::from(other.magnitude()),
        )?;
        Ok(Self::from_raw(self.sign_of_product(other), narrow(raw)?))
    }

    /// Quotient rounded away from zero.
    pub fn quo_round_up(&self, other: &Self) -> Result<Self, MathError> {
        let raw = mul_div_ceil(
            U512::from(self.magnitude()),
            U512::from(dec_scale()),
            U512::from(other.magnitude()),
        )?;
        Ok(Self::from_raw(self.sign_of_product(other), narrow(raw)?))
    }

    /// Multiply by a whole number without an intermediate rescale.
    pub fn mul_int(&self, value: u128) -> Result<Self, MathError> {
        let raw = self
            .magnitude()
            .checked_mul(U256::from(value))
            .ok_or(MathError::Overflow)?;
        Ok(Self::from_raw(self.is_negative(), raw))
    }

    /// Floor square root of a non-negative value.
    pub fn sqrt(&self) -> Result<Self, MathError> {
        if self.is_negative() {
            return Err(MathError::NegativeResult);
        }
        let widened = U512::from(self.magnitude()) * U512::from(dec_scale());
        Ok(Self::from_raw(false, narrow(widened.integer_sqrt())?))
    }

    // ============================================================
    // INTEGER CONVERSION
    // ============================================================

    /// Integer part, truncated toward zero.
    pub fn truncate_int(&self) -> Result<i128, MathError> {
        let whole = self.magnitude() / dec_scale();
        Self::signed_int(self.is_negative(), whole)
    }

    /// Integer part, rounded away from zero.
    pub fn ceil_int(&self) -> Result<i128, MathError> {
        let whole = narrow(div_ceil(U512::from(self.magnitude()), U512::from(dec_scale()))?)?;
        Self::signed_int(self.is_negative(), whole)
    }

    /// Drop the fractional part, keeping the sign.
    pub fn truncate(&self) -> Self {
        let whole = self.magnitude() / dec_scale();
        Self::from_raw(self.is_negative(), whole * dec_scale())
    }

    fn signed_int(neg: bool, whole: U256) -> Result<i128, MathError> {
        if whole > U256::from(i128::MAX as u128) {
            return Err(MathError::Overflow);
        }
        let value = whole.low_u128() as i128;
        Ok(if neg { -value } else { value })
    }
}

impl PartialEq for Dec {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Dec {}

impl PartialOrd for Dec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Dec {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.magnitude().cmp(&other.magnitude()),
            (true, true) => other.magnitude().cmp(&self.magnitude()),
        }
    }
}
