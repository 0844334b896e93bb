// SPDX-License-Identifier: MIT
// Position Reward Settlement
//
// Claims are measured against the growth inside the position's range since
// its last snapshot, scaled by the position's liquidity. Callers advance the
// snapshots after paying out.

use soroban_sdk::Vec;
use tidepool_accum::{
    add_coin, empty_coins, mul_coins, Accumulator, DecCoins, UptimeGrowth, SUPPORTED_UPTIMES,
};
use tidepool_math::Dec;

use crate::error::PositionError;
use crate::types::Position;

/// Incentives owed to a position, split by whether it qualified
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IncentiveSettlement {
    /// Per token, summed over every tier the position has been open long enough for
    pub claimable: DecCoins,
    /// Per tier amounts the position did not qualify for
    pub forfeited: UptimeGrowth,
}

/// Where forfeited incentives end up
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redeposit {
    /// Pool uptime growth including the redistributed amounts
    pub uptime_growth: UptimeGrowth,
    /// Per-liquidity increment added to each tier; the forfeiting position
    /// must add it to its own snapshot when it is in range
    pub increments: UptimeGrowth,
    /// Amounts returned to the owner because nobody else could receive them
    pub refund: DecCoins,
}

fn growth_since(inside: &DecCoins, snapshot: &DecCoins) -> Result<DecCoins, PositionError> {
    let delta = inside.accum_sub(snapshot)?;
    if delta.values().iter().any(|v| v.is_negative()) {
        return Err(PositionError::NegativeGrowth);
    }
    Ok(delta)
}

/// Snapshot that leaves the fractional part of `claim` owed.
///
/// Claims pay whole token units. The remainder of each token is carried
/// back as per-liquidity growth below `snapshot`, so the next claim by a
/// position holding `liquidity` picks it up. The carried amount rounds
/// down and never exceeds the remainder.
pub fn carry_remainder(
    snapshot: &DecCoins,
    claim: &DecCoins,
    liquidity: &Dec,
) -> Result<DecCoins, PositionError> {
    let mut out = snapshot.clone();
    if !liquidity.is_positive() {
        return Ok(out);
    }
    for (token, amount) in claim.iter() {
        let remainder = amount.checked_sub(&Dec::from_int(amount.truncate_int()?))?;
        let per_liquidity = remainder.quo(liquidity)?;
        if per_liquidity.is_positive() {
            add_coin(&mut out, &token, &per_liquidity.neg())?;
        }
    }
    Ok(out)
}

/// Same as `carry_remainder` for uptime snapshots. The remainder goes to
/// the shortest tier.
pub fn carry_uptime_remainder(
    snapshots: &UptimeGrowth,
    claim: &DecCoins,
    liquidity: &Dec,
) -> Result<UptimeGrowth, PositionError> {
    let mut out = snapshots.clone();
    if let Some(shortest) = snapshots.get(0) {
        out.set(0, carry_remainder(&shortest, claim, liquidity)?);
    }
    Ok(out)
}

/// Spread rewards earned since the last snapshot.
pub fn spread_reward_claim(position: &Position, growth_inside: &DecCoins) -> Result<DecCoins, PositionError> {
    let delta = growth_since(growth_inside, &position.spread_reward_snapshot)?;
    Ok(mul_coins(&delta, &position.liquidity)?)
}

/// Incentives earned since the last snapshot.
///
/// A tier's share is claimable only if the position has existed for at
/// least that tier's uptime at `now`; otherwise it is forfeited.
pub fn incentive_settlement(
    position: &Position,
    uptime_growth_inside: &UptimeGrowth,
    now: u64,
) -> Result<IncentiveSettlement, PositionError> {
    let env = uptime_growth_inside.env();
    if uptime_growth_inside.len() != position.uptime_snapshots.len() {
        return Err(PositionError::Accum(tidepool_accum::AccumError::UptimeLengthMismatch));
    }

    let age = now.saturating_sub(position.join_time);
    let mut claimable = empty_coins(env);
    let mut forfeited = Vec::new(env);

    for (i, uptime) in SUPPORTED_UPTIMES.iter().enumerate() {
        let i = i as u32;
        let inside = uptime_growth_inside.get(i).unwrap_or_else(|| empty_coins(env));
        let snapshot = position.uptime_snapshots.get(i).unwrap_or_else(|| empty_coins(env));
        let earned = mul_coins(&growth_since(&inside, &snapshot)?, &position.liquidity)?;

        if age >= *uptime {
            claimable = claimable.accum_add(&earned)?;
            forfeited.push_back(empty_coins(env));
        } else {
            forfeited.push_back(earned);
        }
    }

    Ok(IncentiveSettlement { claimable, forfeited })
}

/// Spread forfeited incentives over `other_liquidity`.
///
/// `other_liquidity` is the active pool liquidity excluding the forfeiting
/// position. Below one unit the forfeited amounts are refunded instead.
pub fn redeposit_forfeited(
    uptime_growth: &UptimeGrowth,
    forfeited: &UptimeGrowth,
    other_liquidity: &Dec,
) -> Result<Redeposit, PositionError> {
    let env = uptime_growth.env();
    let zeroed = uptime_growth.zeroed();

    if *other_liquidity < Dec::one() {
        let mut refund = empty_coins(env);
        for tier in forfeited.iter() {
            refund = refund.accum_add(&tier)?;
        }
        return Ok(Redeposit {
            uptime_growth: uptime_growth.clone(),
            increments: zeroed,
            refund,
        });
    }

    let mut increments = Vec::new(env);
    for tier in forfeited.iter() {
        let mut per_liquidity = empty_coins(env);
        for (token, amount) in tier.iter() {
            add_coin(&mut per_liquidity, &token, &amount.quo(other_liquidity)?)?;
        }
        increments.push_back(per_liquidity);
    }

    Ok(Redeposit {
        uptime_growth: uptime_growth.accum_add(&increments)?,
        increments,
        refund: empty_coins(env),
    })
}
