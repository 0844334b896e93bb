// Growth Inside a Range

use tidepool_accum::{growth_inside, DecCoins, UptimeGrowth};

use crate::error::TickError;
use crate::types::TickInfo;

pub fn spread_reward_growth_inside(
    current_tick: i32,
    lower_tick: i32,
    lower: &TickInfo,
    upper_tick: i32,
    upper: &TickInfo,
    global: &DecCoins,
) -> Result<DecCoins, TickError> {
    Ok(growth_inside(
        current_tick,
        lower_tick,
        &lower.spread_reward_growth_opposite,
        upper_tick,
        &upper.spread_reward_growth_opposite,
        global,
    )?)
}

pub fn uptime_growth_inside(
    current_tick: i32,
    lower_tick: i32,
    lower: &TickInfo,
    upper_tick: i32,
    upper: &TickInfo,
    global: &UptimeGrowth,
) -> Result<UptimeGrowth, TickError> {
    Ok(growth_inside(
        current_tick,
        lower_tick,
        &lower.uptime_growth_outside,
        upper_tick,
        &upper.uptime_growth_outside,
        global,
    )?)
}
