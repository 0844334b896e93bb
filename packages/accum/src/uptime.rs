// SPDX-License-Identifier: MIT
// Uptime Incentive Accumulators

use soroban_sdk::{contracttype, Address, Env, Vec};
use tidepool_math::{Dec, MathError};

use crate::coins::{add_coin, empty_coins, DecCoins};
use crate::error::AccumError;

/// Uptime tiers in seconds: 1s, 1m, 1h, 1d, 7d, 14d
pub const SUPPORTED_UPTIMES: [u64; 6] = [1, 60, 3_600, 86_400, 604_800, 1_209_600];

/// One growth value per entry of SUPPORTED_UPTIMES
pub type UptimeGrowth = Vec<DecCoins>;

pub fn uptime_index(uptime: u64) -> Option<u32> {
    SUPPORTED_UPTIMES
        .iter()
        .position(|u| *u == uptime)
        .map(|i| i as u32)
}

pub fn empty_uptime_growth(env: &Env) -> UptimeGrowth {
    let mut growth = Vec::new(env);
    for _ in SUPPORTED_UPTIMES.iter() {
        growth.push_back(empty_coins(env));
    }
    growth
}

/// Externally funded emission stream for one pool and one uptime tier
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IncentiveRecord {
    pub id: u64,
    pub pool_id: u64,
    pub token: Address,
    /// Amount not yet emitted
    pub remaining: Dec,
    /// Tokens emitted per second
    pub emission_rate: Dec,
    pub start_time: u64,
    pub min_uptime: u64,
}

/// Result of an accumulator sync
#[derive(Clone, Debug)]
pub struct UptimeSync {
    pub uptime_growth: UptimeGrowth,
    /// Records still holding an amount to emit
    pub records: Vec<IncentiveRecord>,
    /// Ids of records whose increment was skipped because it truncated to zero
    pub truncated: Vec<u64>,
    /// Ids of records whose increment was skipped because it overflowed
    pub overflowed: Vec<u64>,
    /// Ids of records that emitted their last amount and were dropped
    pub exhausted: Vec<u64>,
}

/// Emit every active incentive record from `last_update` to `now`.
///
/// An increment is skipped entirely, without consuming `remaining`, when
/// there is no liquidity, when the per-liquidity amount truncates to zero,
/// or when it does not fit a `Dec`. A record's failure never affects the
/// other records. Records left with nothing to emit are dropped.
/// Calling this twice with the same `now` leaves everything unchanged.
pub fn sync_uptime_accumulators(
    env: &Env,
    uptime_growth: &UptimeGrowth,
    records: &Vec<IncentiveRecord>,
    liquidity: &Dec,
    last_update: u64,
    now: u64,
) -> Result<UptimeSync, AccumError> {
    let mut growth = uptime_growth.clone();
    let mut updated = Vec::new(env);
    let mut truncated = Vec::new(env);
    let mut overflowed = Vec::new(env);
    let mut exhausted = Vec::new(env);

    for record in records.iter() {
        let mut record = record;
        let from = last_update.max(record.start_time);

        if now > from && record.remaining.is_positive() {
            let tier = uptime_index(record.min_uptime).ok_or(AccumError::UnsupportedUptime)?;
            let elapsed = (now - from) as u128;

            match emission_per_liquidity(&record, elapsed, liquidity)? {
                None => overflowed.push_back(record.id),
                Some((_, per_liquidity)) if per_liquidity.is_zero() => truncated.push_back(record.id),
                Some((increment, per_liquidity)) => {
                    let mut tier_growth = growth.get(tier).unwrap_or_else(|| empty_coins(env));
                    match add_coin(&mut tier_growth, &record.token, &per_liquidity) {
                        Ok(()) => {
                            growth.set(tier, tier_growth);
                            record.remaining = record.remaining.checked_sub_non_negative(&increment)?;
                        }
                        Err(MathError::Overflow) => overflowed.push_back(record.id),
                        Err(err) => return Err(err.into()),
                    }
                }
            }
        }

        if record.remaining.is_positive() {
            updated.push_back(record);
        } else {
            exhausted.push_back(record.id);
        }
    }

    Ok(UptimeSync {
        uptime_growth: growth,
        records: updated,
        truncated,
        overflowed,
        exhausted,
    })
}

/// (amount emitted, amount per unit of liquidity) for `elapsed` seconds,
/// or None when the per-liquidity amount overflows.
///
/// An emission that overflows is larger than any remaining amount, so it
/// is capped at `remaining` rather than skipped.
fn emission_per_liquidity(
    record: &IncentiveRecord,
    elapsed: u128,
    liquidity: &Dec,
) -> Result<Option<(Dec, Dec)>, AccumError> {
    let increment = match record.emission_rate.mul_int(elapsed) {
        Ok(emitted) => emitted.min(record.remaining),
        Err(MathError::Overflow) => record.remaining,
        Err(err) => return Err(err.into()),
    };

    if !liquidity.is_positive() {
        return Ok(Some((increment, Dec::zero())));
    }
    match increment.quo(liquidity) {
        Ok(per_liquidity) => Ok(Some((increment, per_liquidity))),
        Err(MathError::Overflow) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
