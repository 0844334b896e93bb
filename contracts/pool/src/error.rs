// Engine error module
//
// Package errors convert into PoolError so contract code can use `?`
// throughout. Codes are grouped by concern.

use soroban_sdk::contracterror;
use tidepool_accum::AccumError;
use tidepool_math::MathError;
use tidepool_position::PositionError;
use tidepool_swap::SwapError;
use tidepool_tick::TickError;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    // Initialization and authorization errors (100-199)
    AlreadyInitialized = 100,
    NotInitialized = 101,

    // Pool configuration errors (200-299)
    PoolAlreadyExists = 200,
    PoolNotFound = 201,
    /// Token0 and token1 are the same address
    InvalidTokenPair = 202,
    InvalidTickSpacing = 203,
    /// Spread factor must be in [0, 1)
    InvalidSpreadFactor = 204,
    /// Token is not one of the pool's two tokens
    InvalidToken = 205,

    // Tick errors (300-399)
    /// Lower tick must be below upper tick
    InvalidTickRange = 300,
    TickNotMultipleOfSpacing = 301,
    TickOutOfBounds = 302,
    TickNotFound = 303,
    InvalidTickKey = 304,
    NegativeLiquidityGross = 305,

    // Position errors (400-499)
    PositionNotFound = 400,
    NotPositionOwner = 401,
    /// Token amounts must be non-negative and not both zero
    InvalidAmount = 402,
    /// Amounts supplied back no liquidity over the range
    ZeroLiquidity = 403,
    /// Deposited amount below the caller's minimum
    InsufficientAmount = 404,
    /// Withdrawal exceeds the position's liquidity
    InsufficientPositionLiquidity = 405,
    /// First position of a pool must supply both tokens
    InitialLiquidityZero = 406,
    TooFewPositions = 407,
    PositionsNotFungible = 408,
    PositionNotFullyCharged = 409,

    // Swap errors (500-599)
    ZeroSwapAmount = 500,
    NoLiquidity = 501,
    InvalidPriceLimit = 502,
    /// Output below minimum, or input above maximum
    SlippageExceeded = 503,
    ZeroAmountOut = 504,
    InsufficientLiquidity = 505,
    NegativeLiquidity = 506,
    MaxIterations = 507,

    // Incentive errors (600-699)
    UnsupportedUptime = 600,
    UnauthorizedUptime = 601,
    InvalidIncentiveAmount = 602,
    InvalidEmissionRate = 603,
    InvalidStartTime = 604,
    NegativeGrowth = 605,
    /// Pool already has the maximum number of active incentive records
    TooManyIncentives = 606,

    // Math errors (700-799)
    Overflow = 700,
    DivisionByZero = 701,
    NegativeResult = 702,
    PriceOutOfBounds = 703,
    InvalidDecimal = 704,
    UptimeLengthMismatch = 705,
}

/// Messages for host-level panics on state that must exist
pub struct ErrorMsg;

impl ErrorMsg {
    pub const NOT_INITIALIZED: &'static str = "engine not initialized";
}

impl From<MathError> for PoolError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::Overflow => PoolError::Overflow,
            MathError::DivisionByZero => PoolError::DivisionByZero,
            MathError::NegativeResult => PoolError::NegativeResult,
            MathError::TickOutOfBounds => PoolError::TickOutOfBounds,
            MathError::PriceOutOfBounds => PoolError::PriceOutOfBounds,
            MathError::InvalidTickKey => PoolError::InvalidTickKey,
            MathError::InvalidDecimal => PoolError::InvalidDecimal,
        }
    }
}

impl From<AccumError> for PoolError {
    fn from(err: AccumError) -> Self {
        match err {
            AccumError::Math(inner) => inner.into(),
            AccumError::UnsupportedUptime => PoolError::UnsupportedUptime,
            AccumError::NegativeGrowth => PoolError::NegativeGrowth,
            AccumError::UptimeLengthMismatch => PoolError::UptimeLengthMismatch,
        }
    }
}

impl From<TickError> for PoolError {
    fn from(err: TickError) -> Self {
        match err {
            TickError::Math(inner) => inner.into(),
            TickError::Accum(inner) => inner.into(),
            TickError::NegativeLiquidityGross => PoolError::NegativeLiquidityGross,
        }
    }
}

impl From<SwapError> for PoolError {
    fn from(err: SwapError) -> Self {
        match err {
            SwapError::Math(inner) => inner.into(),
            SwapError::Tick(inner) => inner.into(),
            SwapError::ZeroSwapAmount => PoolError::ZeroSwapAmount,
            SwapError::NoLiquidity => PoolError::NoLiquidity,
            SwapError::InvalidPriceLimit => PoolError::InvalidPriceLimit,
            SwapError::InvalidStepTarget => PoolError::InvalidPriceLimit,
            SwapError::ZeroAmountOut => PoolError::ZeroAmountOut,
            SwapError::InsufficientLiquidity => PoolError::InsufficientLiquidity,
            SwapError::NegativeLiquidity => PoolError::NegativeLiquidity,
            SwapError::TickNotFound => PoolError::TickNotFound,
            SwapError::MaxIterations => PoolError::MaxIterations,
        }
    }
}

impl From<PositionError> for PoolError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::Math(inner) => inner.into(),
            PositionError::Accum(inner) => inner.into(),
            PositionError::InvalidTickRange => PoolError::InvalidTickRange,
            PositionError::TickNotMultipleOfSpacing => PoolError::TickNotMultipleOfSpacing,
            PositionError::TickOutOfBounds => PoolError::TickOutOfBounds,
            PositionError::InitialLiquidityZero => PoolError::InitialLiquidityZero,
            PositionError::PriceOutOfBounds => PoolError::PriceOutOfBounds,
            PositionError::NegativeGrowth => PoolError::NegativeGrowth,
            PositionError::TooFewPositions => PoolError::TooFewPositions,
            PositionError::NotPositionOwner => PoolError::NotPositionOwner,
            PositionError::PositionsNotFungible => PoolError::PositionsNotFungible,
            PositionError::PositionNotFullyCharged => PoolError::PositionNotFullyCharged,
        }
    }
}
