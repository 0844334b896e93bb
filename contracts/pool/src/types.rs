// Engine types

use soroban_sdk::{contracttype, Address, Map};
use tidepool_accum::{DecCoins, UptimeGrowth};
use tidepool_math::Dec;

pub use tidepool_accum::IncentiveRecord;
pub use tidepool_position::Position;
pub use tidepool_swap::SwapResult;
pub use tidepool_tick::TickInfo;

// ============================================================
// ENGINE CONFIGURATION
// ============================================================

#[contracttype]
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// May change the authorized uptimes
    pub admin: Address,
    /// Pool registry; the only caller allowed to create pools
    pub registry: Address,
}

// ============================================================
// POOL STATE
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    pub id: u64,
    pub token0: Address,
    pub token1: Address,
    /// Position ticks must be multiples of this
    pub tick_spacing: u32,
    pub exponent_at_price_one: i32,
    /// Fraction of swap input charged as spread, in [0, 1)
    pub spread_factor: Dec,
    /// Zero until the first position sets the price
    pub sqrt_price: Dec,
    pub current_tick: i32,
    /// Liquidity of positions whose range contains current_tick
    pub liquidity: Dec,
    /// Ledger timestamp the uptime accumulators were last synced at
    pub last_liquidity_update: u64,
    pub spread_reward_growth: DecCoins,
    pub uptime_growth: UptimeGrowth,
}

impl PoolState {
    pub fn has_price(&self) -> bool {
        self.sqrt_price.is_positive()
    }

    /// True if `token` is token0, false if token1.
    pub fn is_token0(&self, token: &Address) -> Option<bool> {
        if *token == self.token0 {
            Some(true)
        } else if *token == self.token1 {
            Some(false)
        } else {
            None
        }
    }
}

// ============================================================
// OPERATION RESULTS
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionResult {
    pub position_id: u64,
    /// Token0 deposited, rounded up
    pub amount0: i128,
    /// Token1 deposited, rounded up
    pub amount1: i128,
    /// Liquidity added by this call
    pub liquidity_delta: Dec,
    pub lower_tick: i32,
    pub upper_tick: i32,
    pub join_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawResult {
    /// Token0 returned, rounded down
    pub amount0: i128,
    /// Token1 returned, rounded down
    pub amount1: i128,
    /// The position was deleted
    pub closed: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimableIncentives {
    pub claimable: Map<Address, i128>,
    /// Earned in tiers the position is still too young for
    pub forfeited: Map<Address, i128>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolLiquidity {
    /// Token0 backing all positions at the current price, rounded down
    pub amount0: i128,
    /// Token1 backing all positions at the current price, rounded down
    pub amount1: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickLiquidityNet {
    pub tick: i32,
    pub liquidity_net: Dec,
}
