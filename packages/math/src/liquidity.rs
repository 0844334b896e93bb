// SPDX-License-Identifier: MIT
// Liquidity Calculations

use primitive_types::U512;

use crate::big_dec::BigDec;
use crate::dec::Dec;
use crate::error::MathError;
use crate::price::tick_to_sqrt_price;
use crate::wide::{dec_scale, mul_div_floor, narrow};

fn ordered(a: &Dec, b: &Dec) -> (Dec, Dec) {
    if a <= b { (*a, *b) } else { (*b, *a) }
}

fn width(a: &Dec, b: &Dec) -> Result<(Dec, Dec, Dec), MathError> {
    let (lower, upper) = ordered(a, b);
    let diff = upper.checked_sub(&lower)?;
    if diff.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    Ok((lower, upper, diff))
}

// ============================================================
// AMOUNT -> LIQUIDITY
// ============================================================

/// amount0 * sqrtA * sqrtB / (sqrtB - sqrtA), truncated
pub fn liquidity0(amount: &Dec, sqrt_a: &Dec, sqrt_b: &Dec) -> Result<Dec, MathError> {
    let (lower, upper, diff) = width(sqrt_a, sqrt_b)?;
    let numerator = U512::from(amount.magnitude()) * U512::from(lower.magnitude());
    let denominator = U512::from(diff.magnitude()) * U512::from(dec_scale());
    let raw = mul_div_floor(numerator, U512::from(upper.magnitude()), denominator)?;
    Ok(Dec::from_raw(false, narrow(raw)?))
}

/// amount1 / (sqrtB - sqrtA), truncated
pub fn liquidity1(amount: &Dec, sqrt_a: &Dec, sqrt_b: &Dec) -> Result<Dec, MathError> {
    let (_, _, diff) = width(sqrt_a, sqrt_b)?;
    amount.quo(&diff)
}

/// Largest liquidity the desired amounts can back at the current price.
pub fn liquidity_from_amounts(
    sqrt_price_current: &Dec,
    sqrt_a: &Dec,
    sqrt_b: &Dec,
    amount0: &Dec,
    amount1: &Dec,
) -> Result<Dec, MathError> {
    let (lower, upper) = ordered(sqrt_a, sqrt_b);

    if *sqrt_price_current <= lower {
        liquidity0(amount0, &lower, &upper)
    } else if *sqrt_price_current < upper {
        let l0 = liquidity0(amount0, sqrt_price_current, &upper)?;
        let l1 = liquidity1(amount1, sqrt_price_current, &lower)?;
        Ok(core::cmp::min(l0, l1))
    } else {
        liquidity1(amount1, &lower, &upper)
    }
}

// ============================================================
// LIQUIDITY -> AMOUNT
// ============================================================

/// liquidity * (sqrtB - sqrtA) / (sqrtA * sqrtB) at 36 decimals
pub fn calc_amount0_delta(
    liquidity: &Dec,
    sqrt_a: &Dec,
    sqrt_b: &Dec,
    round_up: bool,
) -> Result<BigDec, MathError> {
    let (lower, upper) = ordered(sqrt_a, sqrt_b);
    let diff = BigDec::from_dec(&upper.checked_sub(&lower)?)?;
    let numerator = BigDec::from_dec(liquidity)?.mul_trunc(&diff)?;
    let denominator = BigDec::from_dec(&lower)?.mul_trunc(&BigDec::from_dec(&upper)?)?;

    if round_up {
        numerator.quo_round_up(&denominator)
    } else {
        numerator.quo_trunc(&denominator)
    }
}

/// liquidity * (sqrtB - sqrtA) at 36 decimals
pub fn calc_amount1_delta(
    liquidity: &Dec,
    sqrt_a: &Dec,
    sqrt_b: &Dec,
    round_up: bool,
) -> Result<BigDec, MathError> {
    let (lower, upper) = ordered(sqrt_a, sqrt_b);
    let diff = BigDec::from_dec(&upper.checked_sub(&lower)?)?;
    let liquidity = BigDec::from_dec(liquidity)?;

    if round_up {
        liquidity.mul_round_up(&diff)
    } else {
        liquidity.mul_trunc(&diff)
    }
}

fn narrow_amount(amount: BigDec, round_up: bool) -> Result<Dec, MathError> {
    if round_up {
        amount.to_dec_round_up()
    } else {
        amount.to_dec()
    }
}

/// Token amounts backing `liquidity_delta` over [lower_tick, upper_tick).
///
/// A positive delta is a deposit and rounds up; a negative delta is a
/// withdrawal and rounds down. Both returned amounts are non-negative.
pub fn amounts_for_liquidity(
    sqrt_price_current: &Dec,
    current_tick: i32,
    lower_tick: i32,
    upper_tick: i32,
    liquidity_delta: &Dec,
) -> Result<(Dec, Dec), MathError> {
    let round_up = liquidity_delta.is_positive();
    let liquidity = liquidity_delta.abs();
    let sqrt_lower = tick_to_sqrt_price(lower_tick)?;
    let sqrt_upper = tick_to_sqrt_price(upper_tick)?;

    if current_tick < lower_tick {
        let amount0 = calc_amount0_delta(&liquidity, &sqrt_lower, &sqrt_upper, round_up)?;
        Ok((narrow_amount(amount0, round_up)?, Dec::zero()))
    } else if current_tick < upper_tick {
        let amount0 = calc_amount0_delta(&liquidity, sqrt_price_current, &sqrt_upper, round_up)?;
        let amount1 = calc_amount1_delta(&liquidity, &sqrt_lower, sqrt_price_current, round_up)?;
        Ok((narrow_amount(amount0, round_up)?, narrow_amount(amount1, round_up)?))
    } else {
        let amount1 = calc_amount1_delta(&liquidity, &sqrt_lower, &sqrt_upper, round_up)?;
        Ok((Dec::zero(), narrow_amount(amount1, round_up)?))
    }
}
