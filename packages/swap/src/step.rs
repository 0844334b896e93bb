// SPDX-License-Identifier: MIT
// Swap Step
//
// One bounded move of the price at constant liquidity. The spread factor is
// never applied here; the caller removes it from the input (exact in) or
// adds it on top (exact out).

use primitive_types::U512;
use tidepool_math::wide::{dec_scale, mul_div_ceil, narrow};
use tidepool_math::{calc_amount0_delta, calc_amount1_delta, BigDec, Dec, MathError};

use crate::error::SwapError;

/// Result of a single step
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SwapStep {
    pub sqrt_price_next: Dec,
    pub amount_in: Dec,
    pub amount_out: Dec,
}

/// Compute one swap step from `sqrt_price_current` toward `sqrt_price_target`.
///
/// If `amount_remaining` can be absorbed before the target, the next price is
/// solved from the constant-liquidity relation; otherwise the step stops at
/// the target. `amount_remaining` is an input amount when `exact_in`, an
/// output amount otherwise.
pub fn compute_swap_step(
    sqrt_price_current: &Dec,
    sqrt_price_target: &Dec,
    liquidity: &Dec,
    amount_remaining: &Dec,
    zero_for_one: bool,
    exact_in: bool,
) -> Result<SwapStep, SwapError> {
    let wrong_side = if zero_for_one {
        sqrt_price_target > sqrt_price_current
    } else {
        sqrt_price_target < sqrt_price_current
    };
    if wrong_side {
        return Err(SwapError::InvalidStepTarget);
    }

    let step = match (zero_for_one, exact_in) {
        (true, true) => zero_for_one_exact_in(sqrt_price_current, sqrt_price_target, liquidity, amount_remaining),
        (false, true) => one_for_zero_exact_in(sqrt_price_current, sqrt_price_target, liquidity, amount_remaining),
        (true, false) => zero_for_one_exact_out(sqrt_price_current, sqrt_price_target, liquidity, amount_remaining),
        (false, false) => one_for_zero_exact_out(sqrt_price_current, sqrt_price_target, liquidity, amount_remaining),
    }?;
    Ok(step)
}

// ============================================================
// EXACT IN
// ============================================================

/// Sell token0: price falls.
fn zero_for_one_exact_in(
    current: &Dec,
    target: &Dec,
    liquidity: &Dec,
    remaining: &Dec,
) -> Result<SwapStep, MathError> {
    let to_target = calc_amount0_delta(liquidity, target, current, true)?;

    let sqrt_price_next = if BigDec::from_dec(remaining)? >= to_target {
        *target
    } else {
        next_sqrt_price_from_amount0_in(current, liquidity, remaining)?
    };

    let amount_in = if sqrt_price_next == *target {
        to_target
    } else {
        calc_amount0_delta(liquidity, &sqrt_price_next, current, true)?
    };
    let amount_out = calc_amount1_delta(liquidity, &sqrt_price_next, current, false)?;

    Ok(SwapStep {
        sqrt_price_next,
        amount_in: core::cmp::min(amount_in.to_dec()?, *remaining),
        amount_out: amount_out.to_dec()?,
    })
}

/// Sell token1: price rises.
fn one_for_zero_exact_in(
    current: &Dec,
    target: &Dec,
    liquidity: &Dec,
    remaining: &Dec,
) -> Result<SwapStep, MathError> {
    let to_target = calc_amount1_delta(liquidity, current, target, true)?;

    let sqrt_price_next = if BigDec::from_dec(remaining)? >= to_target {
        *target
    } else {
        current.checked_add(&remaining.quo(liquidity)?)?
    };

    let amount_in = if sqrt_price_next == *target {
        to_target
    } else {
        calc_amount1_delta(liquidity, current, &sqrt_price_next, true)?
    };
    let amount_out = calc_amount0_delta(liquidity, current, &sqrt_price_next, false)?;

    Ok(SwapStep {
        sqrt_price_next,
        amount_in: core::cmp::min(amount_in.to_dec()?, *remaining),
        amount_out: amount_out.to_dec()?,
    })
}

// ============================================================
// EXACT OUT
// ============================================================

/// Buy token1 with token0: price falls.
fn zero_for_one_exact_out(
    current: &Dec,
    target: &Dec,
    liquidity: &Dec,
    remaining: &Dec,
) -> Result<SwapStep, MathError> {
    let to_target = calc_amount1_delta(liquidity, target, current, false)?;

    let (sqrt_price_next, amount_out) = if BigDec::from_dec(remaining)? >= to_target {
        (*target, to_target.to_dec()?)
    } else {
        let next = current.checked_sub_non_negative(&remaining.quo_round_up(liquidity)?)?;
        (next, *remaining)
    };

    let amount_in = calc_amount0_delta(liquidity, &sqrt_price_next, current, true)?;

    Ok(SwapStep {
        sqrt_price_next,
        amount_in: amount_in.to_dec_round_up()?,
        amount_out,
    })
}

/// Buy token0 with token1: price rises.
fn one_for_zero_exact_out(
    current: &Dec,
    target: &Dec,
    liquidity: &Dec,
    remaining: &Dec,
) -> Result<SwapStep, MathError> {
    let to_target = calc_amount0_delta(liquidity, current, target, false)?;

    let (sqrt_price_next, amount_out) = if BigDec::from_dec(remaining)? >= to_target {
        (*target, to_target.to_dec()?)
    } else {
        let next = next_sqrt_price_from_amount0_out(current, liquidity, remaining)?;
        (next, *remaining)
    };

    let amount_in = calc_amount1_delta(liquidity, current, &sqrt_price_next, true)?;

    Ok(SwapStep {
        sqrt_price_next,
        amount_in: amount_in.to_dec_round_up()?,
        amount_out,
    })
}

// ============================================================
// NEXT PRICE FROM TOKEN0 AMOUNT
// ============================================================

/// L * cur / (L + amount * cur), rounded up so the pool never gives away
/// more token1 than the input pays for.
fn next_sqrt_price_from_amount0_in(
    current: &Dec,
    liquidity: &Dec,
    amount: &Dec,
) -> Result<Dec, MathError> {
    let l = U512::from(liquidity.magnitude());
    let c = U512::from(current.magnitude());
    let a = U512::from(amount.magnitude());
    let scale = U512::from(dec_scale());

    let numerator = l.checked_mul(c).ok_or(MathError::Overflow)?;
    let denominator = l
        .checked_mul(scale)
        .and_then(|ls| a.checked_mul(c).and_then(|ac| ls.checked_add(ac)))
        .ok_or(MathError::Overflow)?;

    Ok(Dec::from_raw(false, narrow(mul_div_ceil(numerator, scale, denominator)?)?))
}

/// L * cur / (L - amount * cur), rounded up.
fn next_sqrt_price_from_amount0_out(
    current: &Dec,
    liquidity: &Dec,
    amount: &Dec,
) -> Result<Dec, MathError> {
    let l = U512::from(liquidity.magnitude());
    let c = U512::from(current.magnitude());
    let a = U512::from(amount.magnitude());
    let scale = U512::from(dec_scale());

    let numerator = l.checked_mul(c).ok_or(MathError::Overflow)?;
    let taken = a.checked_mul(c).ok_or(MathError::Overflow)?;
    let denominator = l
        .checked_mul(scale)
        .and_then(|ls| ls.checked_sub(taken))
        .ok_or(MathError::NegativeResult)?;

    Ok(Dec::from_raw(false, narrow(mul_div_ceil(numerator, scale, denominator)?)?))
}
