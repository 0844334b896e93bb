#![no_std]

pub mod error;
pub mod fungify;
pub mod manager;
pub mod rewards;
pub mod types;

pub use error::PositionError;
pub use fungify::{fungified_snapshots, validate_fungible};
pub use manager::{initial_sqrt_price, is_active, validate_range};
pub use rewards::{
    carry_remainder, carry_uptime_remainder, incentive_settlement, redeposit_forfeited,
    spread_reward_claim, IncentiveSettlement, Redeposit,
};
pub use types::Position;
