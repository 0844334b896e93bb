// Tick Types

use soroban_sdk::{contracttype, Env, Vec};
use tidepool_accum::{empty_coins, empty_uptime_growth, DecCoins};
use tidepool_math::Dec;

/// Information stored for each initialized tick
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickInfo {
    /// Total liquidity referencing this tick
    pub liquidity_gross: Dec,
    /// Net liquidity change when crossing left-to-right
    pub liquidity_net: Dec,
    /// Spread reward growth on the side of the tick away from the price
    pub spread_reward_growth_opposite: DecCoins,
    /// Uptime growth outside this tick, one entry per uptime tier
    pub uptime_growth_outside: Vec<DecCoins>,
}

impl TickInfo {
    pub fn new(env: &Env) -> Self {
        Self {
            liquidity_gross: Dec::zero(),
            liquidity_net: Dec::zero(),
            spread_reward_growth_opposite: empty_coins(env),
            uptime_growth_outside: empty_uptime_growth(env),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.liquidity_gross.is_positive()
    }
}

/// Outcome of a liquidity change on one tick
#[derive(Clone, Debug)]
pub struct TickUpdate {
    pub info: TickInfo,
    /// liquidity_gross went from zero to positive
    pub initialized: bool,
    /// liquidity_gross returned to zero; the record should be deleted
    pub emptied: bool,
}

/// Tick crossed during a swap, with its record after the flip
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CrossedTick {
    pub tick: i32,
    pub info: TickInfo,
}
