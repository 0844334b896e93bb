// Tidepool Math Package

#![no_std]

pub mod big_dec;
pub mod constants;
pub mod dec;
pub mod error;
pub mod liquidity;
pub mod price;
pub mod tick_key;
pub mod wide;

pub use constants::*;
pub use big_dec::BigDec;
pub use dec::Dec;
pub use error::MathError;

pub use price::{
    max_spot_price,
    max_sqrt_price,
    min_spot_price,
    min_sqrt_price,
    price_to_tick,
    sqrt_price_to_tick,
    tick_to_price,
    tick_to_sqrt_price,
    tick_to_sqrt_price_big,
    validate_tick,
};

pub use tick_key::{decode_tick, encode_tick, tick_from_key, tick_key};

pub use liquidity::{
    amounts_for_liquidity,
    calc_amount0_delta,
    calc_amount1_delta,
    liquidity0,
    liquidity1,
    liquidity_from_amounts,
};

/// True if `tick` is a multiple of `spacing`
pub fn is_tick_aligned(tick: i32, spacing: u32) -> bool {
    spacing > 0 && tick.rem_euclid(spacing as i32) == 0
}
