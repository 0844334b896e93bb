// SPDX-License-Identifier: MIT
// Growth Inside / Outside
//
// A tick's "outside" value is the growth accrued on the side of the tick
// that does not contain the current price. Crossing a tick flips it to
// `global - outside`.

use crate::coins::Accumulator;
use crate::error::AccumError;

/// Outside value for a tick that has just been initialized.
///
/// If the tick is at or below the current tick, all growth so far is
/// treated as having happened below it.
pub fn initial_outside<G: Accumulator>(current_tick: i32, tick: i32, global: &G) -> G {
    if current_tick >= tick {
        global.clone()
    } else {
        global.zeroed()
    }
}

/// Value to store on a tick as the price crosses it.
pub fn flip_outside<G: Accumulator>(global: &G, outside: &G) -> Result<G, AccumError> {
    global.accum_sub(outside)
}

/// Growth below `tick`.
pub fn growth_below<G: Accumulator>(
    current_tick: i32,
    tick: i32,
    global: &G,
    outside: &G,
) -> Result<G, AccumError> {
    if current_tick >= tick {
        Ok(outside.clone())
    } else {
        global.accum_sub(outside)
    }
}

/// Growth at or above `tick`.
pub fn growth_above<G: Accumulator>(
    current_tick: i32,
    tick: i32,
    global: &G,
    outside: &G,
) -> Result<G, AccumError> {
    if current_tick >= tick {
        global.accum_sub(outside)
    } else {
        Ok(outside.clone())
    }
}

/// Growth accrued while the price was inside [lower_tick, upper_tick).
pub fn growth_inside<G: Accumulator>(
    current_tick: i32,
    lower_tick: i32,
    lower_outside: &G,
    upper_tick: i32,
    upper_outside: &G,
    global: &G,
) -> Result<G, AccumError> {
    let below = growth_below(current_tick, lower_tick, global, lower_outside)?;
    let above = growth_above(current_tick, upper_tick, global, upper_outside)?;
    global.accum_sub(&below)?.accum_sub(&above)
}
