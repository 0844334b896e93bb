// Engine events module

use soroban_sdk::{log, Address, Env, Map, Symbol, Vec};
use tidepool_math::Dec;

/// Event topic names
pub struct EventName;

impl EventName {
    pub const INITIALIZED: &'static str = "initialized";
    pub const UPTIMES_SET: &'static str = "uptimes_set";
    pub const POOL_CREATED: &'static str = "pool_created";
    pub const POSITION_CREATED: &'static str = "position_created";
    pub const POSITION_ADDED: &'static str = "position_added";
    pub const POSITION_WITHDRAWN: &'static str = "position_withdrawn";
    pub const POSITIONS_FUNGIFIED: &'static str = "positions_fungified";
    pub const SWAP: &'static str = "swap";
    pub const SPREAD_COLLECTED: &'static str = "spread_collected";
    pub const INCENTIVES_COLLECTED: &'static str = "incentives_collected";
    pub const INCENTIVES_FORFEITED: &'static str = "incentives_forfeited";
    pub const INCENTIVE_CREATED: &'static str = "incentive_created";
    pub const SPREAD_TRUNCATED: &'static str = "spread_trunc";
    pub const UPTIME_TRUNCATED: &'static str = "uptime_trunc";
    pub const UPTIME_OVERFLOWED: &'static str = "uptime_ovfl";
    pub const INCENTIVE_EXHAUSTED: &'static str = "incentive_done";
}

fn topic(env: &Env, name: &str) -> (Symbol,) {
    (Symbol::new(env, name),)
}

/// Data: (admin, registry)
pub fn emit_initialized(env: &Env, admin: &Address, registry: &Address) {
    env.events().publish(
        topic(env, EventName::INITIALIZED),
        (admin.clone(), registry.clone()),
    );
}

/// Data: (uptimes)
pub fn emit_uptimes_set(env: &Env, uptimes: &Vec<u64>) {
    env.events()
        .publish(topic(env, EventName::UPTIMES_SET), (uptimes.clone(),));
}

/// Data: (pool_id, token0, token1, tick_spacing, spread_factor)
pub fn emit_pool_created(
    env: &Env,
    pool_id: u64,
    token0: &Address,
    token1: &Address,
    tick_spacing: u32,
    spread_factor: &Dec,
) {
    env.events().publish(
        topic(env, EventName::POOL_CREATED),
        (pool_id, token0.clone(), token1.clone(), tick_spacing, *spread_factor),
    );
}

/// Data: (pool_id, position_id, owner, lower_tick, upper_tick, liquidity, amount0, amount1)
pub fn emit_position_created(
    env: &Env,
    pool_id: u64,
    position_id: u64,
    owner: &Address,
    lower_tick: i32,
    upper_tick: i32,
    liquidity: &Dec,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        topic(env, EventName::POSITION_CREATED),
        (
            pool_id,
            position_id,
            owner.clone(),
            lower_tick,
            upper_tick,
            *liquidity,
            amount0,
            amount1,
        ),
    );
}

/// Data: (position_id, liquidity_delta, amount0, amount1)
pub fn emit_position_added(env: &Env, position_id: u64, liquidity: &Dec, amount0: i128, amount1: i128) {
    env.events().publish(
        topic(env, EventName::POSITION_ADDED),
        (position_id, *liquidity, amount0, amount1),
    );
}

/// Data: (position_id, liquidity_delta, amount0, amount1, closed)
pub fn emit_position_withdrawn(
    env: &Env,
    position_id: u64,
    liquidity: &Dec,
    amount0: i128,
    amount1: i128,
    closed: bool,
) {
    env.events().publish(
        topic(env, EventName::POSITION_WITHDRAWN),
        (position_id, *liquidity, amount0, amount1, closed),
    );
}

/// Data: (owner, merged position ids, new position id)
pub fn emit_positions_fungified(env: &Env, owner: &Address, merged: &Vec<u64>, position_id: u64) {
    env.events().publish(
        topic(env, EventName::POSITIONS_FUNGIFIED),
        (owner.clone(), merged.clone(), position_id),
    );
}

/// Data: (pool_id, sender, token_in, amount_in, amount_out, spread_charge, current_tick)
pub fn emit_swap(
    env: &Env,
    pool_id: u64,
    sender: &Address,
    token_in: &Address,
    amount_in: i128,
    amount_out: i128,
    spread_charge: &Dec,
    current_tick: i32,
) {
    env.events().publish(
        topic(env, EventName::SWAP),
        (
            pool_id,
            sender.clone(),
            token_in.clone(),
            amount_in,
            amount_out,
            *spread_charge,
            current_tick,
        ),
    );
}

/// Data: (position_id, amounts)
pub fn emit_spread_collected(env: &Env, position_id: u64, amounts: &Map<Address, i128>) {
    env.events().publish(
        topic(env, EventName::SPREAD_COLLECTED),
        (position_id, amounts.clone()),
    );
}

/// Data: (position_id, amounts)
pub fn emit_incentives_collected(env: &Env, position_id: u64, amounts: &Map<Address, i128>) {
    env.events().publish(
        topic(env, EventName::INCENTIVES_COLLECTED),
        (position_id, amounts.clone()),
    );
}

/// Data: (position_id, refunded_to_owner)
pub fn emit_incentives_forfeited(env: &Env, position_id: u64, refunded: bool) {
    env.events().publish(
        topic(env, EventName::INCENTIVES_FORFEITED),
        (position_id, refunded),
    );
}

/// Data: (pool_id, incentive_id, token, amount, emission_rate, start_time, min_uptime)
pub fn emit_incentive_created(
    env: &Env,
    pool_id: u64,
    incentive_id: u64,
    token: &Address,
    amount: i128,
    emission_rate: &Dec,
    start_time: u64,
    min_uptime: u64,
) {
    env.events().publish(
        topic(env, EventName::INCENTIVE_CREATED),
        (
            pool_id,
            incentive_id,
            token.clone(),
            amount,
            *emission_rate,
            start_time,
            min_uptime,
        ),
    );
}

/// Spread reward increments skipped during a swap.
/// Data: (pool_id, skipped_steps)
pub fn emit_spread_truncated(env: &Env, pool_id: u64, skipped: u32) {
    log!(env, "spread reward increment truncated", pool_id, skipped);
    env.events()
        .publish(topic(env, EventName::SPREAD_TRUNCATED), (pool_id, skipped));
}

/// Uptime increment skipped for one incentive record.
/// Data: (pool_id, incentive_id)
pub fn emit_uptime_truncated(env: &Env, pool_id: u64, incentive_id: u64) {
    log!(env, "uptime increment truncated", pool_id, incentive_id);
    env.events()
        .publish(topic(env, EventName::UPTIME_TRUNCATED), (pool_id, incentive_id));
}

/// Uptime increment skipped because it does not fit a Dec.
/// Data: (pool_id, incentive_id)
pub fn emit_uptime_overflowed(env: &Env, pool_id: u64, incentive_id: u64) {
    log!(env, "uptime increment overflowed", pool_id, incentive_id);
    env.events()
        .publish(topic(env, EventName::UPTIME_OVERFLOWED), (pool_id, incentive_id));
}

/// Incentive record emitted its last amount and was removed.
/// Data: (pool_id, incentive_id)
pub fn emit_incentive_exhausted(env: &Env, pool_id: u64, incentive_id: u64) {
    env.events()
        .publish(topic(env, EventName::INCENTIVE_EXHAUSTED), (pool_id, incentive_id));
}
