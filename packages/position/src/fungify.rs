// Merging positions that share an owner and range

use primitive_types::U512;
use soroban_sdk::{Address, Env, Vec};
use tidepool_accum::{empty_coins, DecCoins, UptimeGrowth, SUPPORTED_UPTIMES};
use tidepool_math::wide::{checked_add, checked_mul, div_ceil, mul_div_floor, narrow};
use tidepool_math::{Dec, MathError};

use crate::error::PositionError;
use crate::types::Position;

/// Check that `positions` can be merged into one.
pub fn validate_fungible(
    positions: &Vec<Position>,
    owner: &Address,
    now: u64,
    fully_charged_after: u64,
) -> Result<(), PositionError> {
    if positions.len() < 2 {
        return Err(PositionError::TooFewPositions);
    }
    let first = positions.get(0).ok_or(PositionError::TooFewPositions)?;

    for position in positions.iter() {
        if position.owner != *owner {
            return Err(PositionError::NotPositionOwner);
        }
        if position.pool_id != first.pool_id
            || position.lower_tick != first.lower_tick
            || position.upper_tick != first.upper_tick
        {
            return Err(PositionError::PositionsNotFungible);
        }
        if now.saturating_sub(position.join_time) < fully_charged_after {
            return Err(PositionError::PositionNotFullyCharged);
        }
    }
    Ok(())
}

/// Summed liquidity and liquidity-weighted snapshots of `positions`.
///
/// Weighted snapshots keep every unclaimed reward claimable by the merged
/// position. Averages are taken exactly and rounded toward positive
/// infinity, so the merged position can never claim more than the originals
/// together and never sits above the range's current growth.
pub fn fungified_snapshots(
    env: &Env,
    positions: &Vec<Position>,
) -> Result<(Dec, DecCoins, UptimeGrowth), PositionError> {
    let mut total = Dec::zero();
    for position in positions.iter() {
        total = total.checked_add(&position.liquidity)?;
    }
    if !total.is_positive() {
        return Err(PositionError::Math(MathError::DivisionByZero));
    }

    let spread = weighted_coins(env, positions, &total, |p| p.spread_reward_snapshot.clone())?;

    let mut uptimes = Vec::new(env);
    for i in 0..SUPPORTED_UPTIMES.len() as u32 {
        let tier = weighted_coins(env, positions, &total, |p| {
            p.uptime_snapshots.get(i).unwrap_or_else(|| empty_coins(env))
        })?;
        uptimes.push_back(tier);
    }
    Ok((total, spread, uptimes))
}

fn weighted_coins(
    env: &Env,
    positions: &Vec<Position>,
    total: &Dec,
    snapshot: impl Fn(&Position) -> DecCoins,
) -> Result<DecCoins, PositionError> {
    let mut tokens: Vec<Address> = Vec::new(env);
    for position in positions.iter() {
        for token in snapshot(&position).keys().iter() {
            if !tokens.contains(&token) {
                tokens.push_back(token);
            }
        }
    }

    let mut out = empty_coins(env);
    for token in tokens.iter() {
        let mut above = U512::zero();
        let mut below = U512::zero();
        for position in positions.iter() {
            let value = snapshot(&position).get(token.clone()).unwrap_or_default();
            let weighted = checked_mul(U512::from(value.magnitude()), U512::from(position.liquidity.magnitude()))?;
            if value.is_negative() {
                below = checked_add(below, weighted)?;
            } else {
                above = checked_add(above, weighted)?;
            }
        }

        let denominator = U512::from(total.magnitude());
        let average = if above >= below {
            Dec::from_raw(false, narrow(div_ceil(above - below, denominator)?)?)
        } else {
            Dec::from_raw(true, narrow(mul_div_floor(below - above, U512::one(), denominator)?)?)
        };
        if !average.is_zero() {
            out.set(token, average);
        }
    }
    Ok(out)
}
