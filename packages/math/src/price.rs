// SPDX-License-Identifier: MIT
// Price Codec
//
// price(tick) = 1.0001^tick. Sqrt prices are built at 36 decimals from the
// binary ladder in `constants` and narrowed to 18 decimals by truncation.

use primitive_types::U512;

use crate::big_dec::BigDec;
use crate::constants::{MAX_TICK, MIN_TICK, SQRT_RATIO_LADDER};
use crate::dec::Dec;
use crate::error::MathError;

pub fn validate_tick(tick: i32) -> Result<(), MathError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::TickOutOfBounds);
    }
    Ok(())
}

/// sqrt(1.0001^tick) at 36 decimals
pub fn tick_to_sqrt_price_big(tick: i32) -> Result<BigDec, MathError> {
    validate_tick(tick)?;

    let abs_tick = tick.unsigned_abs();
    let mut ratio = BigDec::one();
    for (bit, factor) in SQRT_RATIO_LADDER.iter().enumerate() {
        if abs_tick & (1 << bit) != 0 {
            ratio = ratio.mul_trunc(&BigDec::from_raw(U512::from(*factor)))?;
        }
    }

    if tick < 0 {
        ratio = BigDec::one().quo_trunc(&ratio)?;
    }
    Ok(ratio)
}

/// Convert tick to sqrt price
pub fn tick_to_sqrt_price(tick: i32) -> Result<Dec, MathError> {
    tick_to_sqrt_price_big(tick)?.to_dec()
}

/// Convert tick to price (1.0001^tick), truncated to 18 decimals
pub fn tick_to_price(tick: i32) -> Result<Dec, MathError> {
    let sqrt = tick_to_sqrt_price_big(tick)?;
    sqrt.mul_trunc(&sqrt)?.to_dec()
}

pub fn min_sqrt_price() -> Result<Dec, MathError> {
    tick_to_sqrt_price(MIN_TICK)
}

pub fn max_sqrt_price() -> Result<Dec, MathError> {
    tick_to_sqrt_price(MAX_TICK)
}

pub fn min_spot_price() -> Result<Dec, MathError> {
    tick_to_price(MIN_TICK)
}

pub fn max_spot_price() -> Result<Dec, MathError> {
    tick_to_price(MAX_TICK)
}

/// Greatest tick whose sqrt price is <= `sqrt_price`.
pub fn sqrt_price_to_tick(sqrt_price: &Dec) -> Result<i32, MathError> {
    floor_tick(sqrt_price, tick_to_sqrt_price)
}

/// Greatest tick whose price is <= `price`.
pub fn price_to_tick(price: &Dec) -> Result<i32, MathError> {
    floor_tick(price, tick_to_price)
}

/// Binary search over the tick range for the floor of a monotonic ladder.
fn floor_tick(
    value: &Dec,
    ladder: impl Fn(i32) -> Result<Dec, MathError>,
) -> Result<i32, MathError> {
    if *value < ladder(MIN_TICK)? || *value > ladder(MAX_TICK)? {
        return Err(MathError::PriceOutOfBounds);
    }

    let mut low = MIN_TICK;
    let mut high = MAX_TICK;
    // Invariant: ladder(low) <= value, and ladder(high + 1) > value.
    while low < high {
        let mid = low + (high - low + 1) / 2;
        if ladder(mid)? <= *value {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    Ok(low)
}
