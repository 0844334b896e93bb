// SPDX-License-Identifier: MIT
// Position range checks and pool bootstrap pricing

use tidepool_math::{
    is_tick_aligned, max_spot_price, min_spot_price, sqrt_price_to_tick, validate_tick, Dec,
};

use crate::error::PositionError;
use crate::types::Position;

/// Check a [lower, upper) range for a pool with the given tick spacing.
pub fn validate_range(lower_tick: i32, upper_tick: i32, tick_spacing: u32) -> Result<(), PositionError> {
    if lower_tick >= upper_tick {
        return Err(PositionError::InvalidTickRange);
    }
    validate_tick(lower_tick)?;
    validate_tick(upper_tick)?;
    if !is_tick_aligned(lower_tick, tick_spacing) || !is_tick_aligned(upper_tick, tick_spacing) {
        return Err(PositionError::TickNotMultipleOfSpacing);
    }
    Ok(())
}

/// Whether the position's range contains the current tick.
pub fn is_active(position: &Position, current_tick: i32) -> bool {
    position.lower_tick <= current_tick && current_tick < position.upper_tick
}

/// Price implied by the first deposit into an empty pool.
///
/// Returns the sqrt price and its tick. Both amounts must be positive and
/// amount1/amount0 must lie within the spot price bounds.
pub fn initial_sqrt_price(amount0: i128, amount1: i128) -> Result<(Dec, i32), PositionError> {
    if amount0 <= 0 || amount1 <= 0 {
        return Err(PositionError::InitialLiquidityZero);
    }

    let price = Dec::from_int(amount1).quo(&Dec::from_int(amount0))?;
    if price < min_spot_price()? || price > max_spot_price()? {
        return Err(PositionError::PriceOutOfBounds);
    }

    let sqrt_price = price.sqrt()?;
    let tick = sqrt_price_to_tick(&sqrt_price)?;
    Ok((sqrt_price, tick))
}
