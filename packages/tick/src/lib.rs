#![no_std]

pub mod error;
pub mod growth;
pub mod index;
pub mod reader;
pub mod types;
pub mod update;

pub use error::TickError;
pub use growth::{spread_reward_growth_inside, uptime_growth_inside};
pub use index::{insert_tick_key, neighbor_position, next_initialized_in_index, remove_tick_key};
pub use reader::{TickMap, TickReader};
pub use types::{CrossedTick, TickInfo, TickUpdate};
pub use update::{cross_tick, update_tick_with_liquidity};
