// Tick Update and Crossing Logic

use soroban_sdk::Env;
use tidepool_accum::{flip_outside, initial_outside, DecCoins, UptimeGrowth};
use tidepool_math::Dec;

use crate::error::TickError;
use crate::types::{TickInfo, TickUpdate};

/// Apply a liquidity change to one boundary tick.
///
/// `existing` is the stored record, or `None` if the tick is uninitialized.
/// liquidity_net grows at a lower bound and shrinks at an upper bound.
pub fn update_tick_with_liquidity(
    env: &Env,
    existing: Option<TickInfo>,
    tick: i32,
    current_tick: i32,
    liquidity_delta: &Dec,
    is_upper: bool,
    global_spread: &DecCoins,
    global_uptime: &UptimeGrowth,
) -> Result<TickUpdate, TickError> {
    let mut info = existing.unwrap_or_else(|| TickInfo::new(env));

    let gross_before = info.liquidity_gross;
    let gross_after = gross_before.checked_add(liquidity_delta)?;
    if gross_after.is_negative() {
        return Err(TickError::NegativeLiquidityGross);
    }

    let initialized = gross_before.is_zero() && gross_after.is_positive();
    if initialized {
        info.spread_reward_growth_opposite = initial_outside(current_tick, tick, global_spread);
        info.uptime_growth_outside = initial_outside(current_tick, tick, global_uptime);
    }

    info.liquidity_gross = gross_after;
    info.liquidity_net = if is_upper {
        info.liquidity_net.checked_sub(liquidity_delta)?
    } else {
        info.liquidity_net.checked_add(liquidity_delta)?
    };

    Ok(TickUpdate {
        emptied: gross_after.is_zero(),
        initialized,
        info,
    })
}

/// Flip every growth tracker of a tick as the price moves across it.
pub fn cross_tick(
    info: &TickInfo,
    global_spread: &DecCoins,
    global_uptime: &UptimeGrowth,
) -> Result<TickInfo, TickError> {
    let mut crossed = info.clone();
    crossed.spread_reward_growth_opposite =
        flip_outside(global_spread, &info.spread_reward_growth_opposite)?;
    crossed.uptime_growth_outside = flip_outside(global_uptime, &info.uptime_growth_outside)?;
    Ok(crossed)
}
