// SPDX-License-Identifier: MIT

use tidepool_accum::AccumError;
use tidepool_math::MathError;
use tidepool_tick::TickError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SwapError {
    Math(MathError),
    Tick(TickError),
    /// Amount specified is zero or negative
    ZeroSwapAmount,
    /// Pool has no price, or no liquidity in the trade direction
    NoLiquidity,
    /// Price limit is on the wrong side of the current price or out of bounds
    InvalidPriceLimit,
    /// Step target lies behind the current price for the trade direction
    InvalidStepTarget,
    /// The swap would pay out nothing
    ZeroAmountOut,
    /// Requested output could not be filled before the price limit
    InsufficientLiquidity,
    /// Crossing a tick drove active liquidity below zero
    NegativeLiquidity,
    /// Tick index said a tick was initialized but its record is missing
    TickNotFound,
    MaxIterations,
}

impl From<MathError> for SwapError {
    fn from(err: MathError) -> Self {
        SwapError::Math(err)
    }
}

impl From<TickError> for SwapError {
    fn from(err: TickError) -> Self {
        SwapError::Tick(err)
    }
}

impl From<AccumError> for SwapError {
    fn from(err: AccumError) -> Self {
        SwapError::Tick(TickError::Accum(err))
    }
}
