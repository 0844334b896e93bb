use soroban_sdk::{contracttype, Address};
use tidepool_accum::{DecCoins, UptimeGrowth};
use tidepool_math::Dec;

/// Liquidity provided by one owner over [lower_tick, upper_tick)
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub id: u64,
    pub pool_id: u64,
    pub owner: Address,
    pub lower_tick: i32,
    pub upper_tick: i32,
    pub liquidity: Dec,
    /// Ledger timestamp the current uptime clock started at
    pub join_time: u64,
    /// Spread reward growth inside the range at the last settlement
    pub spread_reward_snapshot: DecCoins,
    /// Uptime growth inside the range at the last settlement, per tier
    pub uptime_snapshots: UptimeGrowth,
}
