//! Registry type definitions

use soroban_sdk::{contracttype, Address};
use tidepool_math::Dec;

pub use tidepool_swap::SwapResult;

// ============================================================
// REGISTRY CONFIG
// ============================================================

#[contracttype]
#[derive(Clone, Debug)]
pub struct FactoryConfig {
    pub admin: Address,
    /// Engine contract holding every pool's state
    pub engine: Address,
}

// ============================================================
// CREATE POOL PARAMS
// ============================================================

/// Parameters for creating a new pool
#[contracttype]
#[derive(Clone, Debug)]
pub struct CreatePoolParams {
    pub token_a: Address,
    pub token_b: Address,
    /// Must be an authorized tick spacing
    pub tick_spacing: u32,
    /// Must be an authorized spread factor
    pub spread_factor: Dec,
    /// Keep token_a as token0 instead of sorting the pair
    pub token_a_as_token0: bool,
}

// ============================================================
// POOL RECORD
// ============================================================

/// Registry entry for a created pool
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRecord {
    pub pool_id: u64,
    pub token0: Address,
    pub token1: Address,
    pub tick_spacing: u32,
    pub spread_factor: Dec,
    pub creator: Address,
}
