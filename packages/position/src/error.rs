// SPDX-License-Identifier: MIT

use tidepool_accum::AccumError;
use tidepool_math::MathError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PositionError {
    Math(MathError),
    Accum(AccumError),
    /// lower_tick must be strictly below upper_tick
    InvalidTickRange,
    TickNotMultipleOfSpacing,
    TickOutOfBounds,
    /// First position of a pool must supply both tokens
    InitialLiquidityZero,
    /// Implied initial price is outside the tick range
    PriceOutOfBounds,
    /// Growth inside a range fell below a position snapshot
    NegativeGrowth,
    TooFewPositions,
    NotPositionOwner,
    /// Positions differ in pool or range
    PositionsNotFungible,
    /// A position has not been open for the longest authorized uptime
    PositionNotFullyCharged,
}

impl From<MathError> for PositionError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::TickOutOfBounds => PositionError::TickOutOfBounds,
            MathError::PriceOutOfBounds => PositionError::PriceOutOfBounds,
            other => PositionError::Math(other),
        }
    }
}

impl From<AccumError> for PositionError {
    fn from(err: AccumError) -> Self {
        match err {
            AccumError::NegativeGrowth => PositionError::NegativeGrowth,
            other => PositionError::Accum(other),
        }
    }
}
