// SPDX-License-Identifier: MIT
// Swap Orchestrator
//
// Pure loop over a tick reader. Nothing is written here: the caller gets the
// new pool state and the crossed ticks, and commits them only if the whole
// swap succeeded.

use soroban_sdk::{Env, Vec};
use tidepool_accum::add_coin;
use tidepool_math::{
    max_spot_price, max_sqrt_price, min_spot_price, min_sqrt_price, sqrt_price_to_tick,
    tick_to_sqrt_price, Dec, MAX_SWAP_ITERATIONS,
};
use tidepool_tick::{cross_tick, CrossedTick, TickReader};

use crate::error::SwapError;
use crate::step::compute_swap_step;
use crate::types::{SwapOutcome, SwapParams, SwapState};

// ============================================================
// PRICE LIMIT
// ============================================================

/// Turn an optional spot price limit into a sqrt price limit.
///
/// Without a limit the swap may run to the global price bound in its
/// direction. A limit must not be behind the current price.
pub fn resolve_sqrt_price_limit(
    sqrt_price_current: &Dec,
    price_limit: Option<Dec>,
    zero_for_one: bool,
) -> Result<Dec, SwapError> {
    let bound = if zero_for_one { min_sqrt_price()? } else { max_sqrt_price()? };

    let limit = match price_limit {
        Some(limit) if !limit.is_zero() => limit,
        _ => return Ok(bound),
    };

    if zero_for_one && limit < min_spot_price()? {
        return Err(SwapError::InvalidPriceLimit);
    }
    if !zero_for_one && limit > max_spot_price()? {
        return Err(SwapError::InvalidPriceLimit);
    }

    let sqrt_limit = limit.sqrt()?;
    if zero_for_one {
        if sqrt_limit > *sqrt_price_current {
            return Err(SwapError::InvalidPriceLimit);
        }
        Ok(core::cmp::max(sqrt_limit, bound))
    } else {
        if sqrt_limit < *sqrt_price_current {
            return Err(SwapError::InvalidPriceLimit);
        }
        Ok(core::cmp::min(sqrt_limit, bound))
    }
}

// ============================================================
// SWAP LOOP
// ============================================================

/// Run a swap against `state` and the ticks visible through `ticks`.
pub fn compute_swap(
    env: &Env,
    ticks: &impl TickReader,
    state: &SwapState,
    params: &SwapParams,
) -> Result<SwapOutcome, SwapError> {
    if !params.amount_specified.is_positive() {
        return Err(SwapError::ZeroSwapAmount);
    }
    if !state.sqrt_price.is_positive() {
        return Err(SwapError::NoLiquidity);
    }

    let zero_for_one = params.zero_for_one;
    if state.liquidity.is_zero()
        && ticks.next_initialized_tick(state.current_tick, zero_for_one)?.is_none()
    {
        return Err(SwapError::NoLiquidity);
    }

    let one_minus_spread = Dec::one().checked_sub_non_negative(&params.spread_factor)?;

    let mut pool = state.clone();
    let mut remaining = params.amount_specified;
    let mut computed = Dec::zero();
    let mut spread_charge = Dec::zero();
    let mut crossed: Vec<CrossedTick> = Vec::new(env);
    let mut spread_truncations = 0u32;
    let mut iterations = 0u32;

    while remaining.is_positive() && pool.sqrt_price != params.sqrt_price_limit {
        if iterations >= MAX_SWAP_ITERATIONS {
            return Err(SwapError::MaxIterations);
        }
        iterations += 1;

        let next_tick = ticks.next_initialized_tick(pool.current_tick, zero_for_one)?;
        let tick_sqrt_price = match next_tick {
            Some(tick) => Some(tick_to_sqrt_price(tick)?),
            None => None,
        };
        let bound = match tick_sqrt_price {
            Some(price) => price,
            None if zero_for_one => min_sqrt_price()?,
            None => max_sqrt_price()?,
        };
        let target = if zero_for_one {
            core::cmp::max(bound, params.sqrt_price_limit)
        } else {
            core::cmp::min(bound, params.sqrt_price_limit)
        };

        // Exact in: the spread comes off the top before the curve sees it.
        let step_remaining = if params.exact_in {
            remaining.mul(&one_minus_spread)?
        } else {
            remaining
        };

        let step = compute_swap_step(
            &pool.sqrt_price,
            &target,
            &pool.liquidity,
            &step_remaining,
            zero_for_one,
            params.exact_in,
        )?;

        let reached_target = step.sqrt_price_next == target;
        let step_spread = if params.exact_in {
            let left_over = remaining.checked_sub_non_negative(&step.amount_in)?;
            if !reached_target {
                left_over
            } else {
                core::cmp::min(spread_on_top(&step.amount_in, &params.spread_factor, &one_minus_spread)?, left_over)
            }
        } else {
            spread_on_top(&step.amount_in, &params.spread_factor, &one_minus_spread)?
        };

        if params.exact_in {
            remaining = remaining.checked_sub_non_negative(&step.amount_in.checked_add(&step_spread)?)?;
            computed = computed.checked_add(&step.amount_out)?;
        } else {
            remaining = remaining.checked_sub_non_negative(&step.amount_out)?;
            computed = computed
                .checked_add(&step.amount_in)?
                .checked_add(&step_spread)?;
        }
        spread_charge = spread_charge.checked_add(&step_spread)?;

        if step_spread.is_positive() {
            let per_liquidity = if pool.liquidity.is_positive() {
                step_spread.quo(&pool.liquidity)?
            } else {
                Dec::zero()
            };
            if per_liquidity.is_zero() {
                spread_truncations += 1;
            } else {
                add_coin(&mut pool.spread_reward_growth, &params.token_in, &per_liquidity)?;
            }
        }

        match (next_tick, tick_sqrt_price) {
            (Some(tick), Some(price)) if step.sqrt_price_next == price => {
                let info = ticks.tick_info(tick)?.ok_or(SwapError::TickNotFound)?;
                let flipped = cross_tick(&info, &pool.spread_reward_growth, &pool.uptime_growth)?;

                pool.liquidity = if zero_for_one {
                    pool.liquidity.checked_sub(&info.liquidity_net)?
                } else {
                    pool.liquidity.checked_add(&info.liquidity_net)?
                };
                if pool.liquidity.is_negative() {
                    return Err(SwapError::NegativeLiquidity);
                }

                pool.current_tick = if zero_for_one { tick - 1 } else { tick };
                crossed.push_back(CrossedTick { tick, info: flipped });
            }
            _ => {
                if step.sqrt_price_next != pool.sqrt_price {
                    pool.current_tick = sqrt_price_to_tick(&step.sqrt_price_next)?;
                }
            }
        }
        pool.sqrt_price = step.sqrt_price_next;
    }

    let (amount_in, amount_out) = if params.exact_in {
        let consumed = params.amount_specified.checked_sub_non_negative(&remaining)?;
        (consumed.ceil_int()?, computed.truncate_int()?)
    } else {
        if remaining.is_positive() {
            return Err(SwapError::InsufficientLiquidity);
        }
        (computed.ceil_int()?, params.amount_specified.truncate_int()?)
    };

    if amount_out <= 0 {
        return Err(SwapError::ZeroAmountOut);
    }

    Ok(SwapOutcome {
        state: pool,
        amount_in,
        amount_out,
        spread_charge,
        crossed,
        spread_truncations,
    })
}

/// amount * f / (1 - f), rounded up
fn spread_on_top(amount: &Dec, spread_factor: &Dec, one_minus_spread: &Dec) -> Result<Dec, SwapError> {
    if spread_factor.is_zero() {
        return Ok(Dec::zero());
    }
    Ok(amount.mul_round_up(spread_factor)?.quo_round_up(one_minus_spread)?)
}
