use soroban_sdk::{contracttype, Address, Vec};
use tidepool_accum::{DecCoins, UptimeGrowth};
use tidepool_math::Dec;
use tidepool_tick::CrossedTick;

/// Pool state the swap loop reads and rewrites
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapState {
    pub sqrt_price: Dec,
    pub current_tick: i32,
    pub liquidity: Dec,
    pub spread_reward_growth: DecCoins,
    /// Must already be synced to the swap's timestamp
    pub uptime_growth: UptimeGrowth,
}

/// Swap request after token and direction have been resolved
#[derive(Clone, Debug)]
pub struct SwapParams {
    pub token_in: Address,
    pub zero_for_one: bool,
    pub exact_in: bool,
    /// Input amount when exact in, output amount when exact out
    pub amount_specified: Dec,
    /// Resolved sqrt price limit (see `resolve_sqrt_price_limit`)
    pub sqrt_price_limit: Dec,
    pub spread_factor: Dec,
}

/// Everything the caller must apply to commit a swap
#[derive(Clone, Debug)]
pub struct SwapOutcome {
    pub state: SwapState,
    /// Token in owed by the trader, rounded up
    pub amount_in: i128,
    /// Token out paid to the trader, rounded down
    pub amount_out: i128,
    /// Total spread charged, in token in
    pub spread_charge: Dec,
    /// Ticks crossed, in crossing order, with flipped growth values
    pub crossed: Vec<CrossedTick>,
    /// Steps whose spread reward increment truncated to zero
    pub spread_truncations: u32,
}

/// Swap summary returned from the contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapResult {
    pub amount_in: i128,
    pub amount_out: i128,
    pub spread_charge: Dec,
    pub sqrt_price: Dec,
    pub current_tick: i32,
    pub ticks_crossed: u32,
}

impl SwapOutcome {
    pub fn to_result(&self) -> SwapResult {
        SwapResult {
            amount_in: self.amount_in,
            amount_out: self.amount_out,
            spread_charge: self.spread_charge,
            sqrt_price: self.state.sqrt_price,
            current_tick: self.state.current_tick,
            ticks_crossed: self.crossed.len(),
        }
    }
}
