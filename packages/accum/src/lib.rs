// Tidepool Accumulator Package
//
// Per-liquidity-unit growth tracking for spread rewards and uptime incentives.

#![no_std]

pub mod coins;
pub mod error;
pub mod growth;
pub mod uptime;

pub use coins::{
    add_coin, empty_coins, is_all_zero, mul_coins, truncate_coins, Accumulator, DecCoins,
};
pub use error::AccumError;
pub use growth::{flip_outside, growth_above, growth_below, growth_inside, initial_outside};
pub use uptime::{
    empty_uptime_growth, sync_uptime_accumulators, uptime_index, IncentiveRecord, UptimeGrowth,
    UptimeSync, SUPPORTED_UPTIMES,
};
