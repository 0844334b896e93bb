//! Registry events

use soroban_sdk::{Address, Env, Symbol};
use tidepool_math::Dec;

/// Emitted when the registry is initialized
pub fn emit_initialized(env: &Env, admin: &Address, engine: &Address) {
    env.events().publish(
        (Symbol::new(env, "RegistryInit"),),
        (admin.clone(), engine.clone()),
    );
}

/// Emitted when a new pool is created
pub fn emit_pool_created(
    env: &Env,
    pool_id: u64,
    token0: &Address,
    token1: &Address,
    creator: &Address,
    tick_spacing: u32,
    spread_factor: &Dec,
) {
    env.events().publish(
        (Symbol::new(env, "PoolCreated"),),
        (pool_id, token0.clone(), token1.clone(), creator.clone(), tick_spacing, *spread_factor),
    );
}

/// Emitted when a tick spacing is authorized or revoked
pub fn emit_tick_spacing_updated(env: &Env, tick_spacing: u32, authorized: bool) {
    env.events().publish(
        (Symbol::new(env, "TickSpacingUpdated"),),
        (tick_spacing, authorized),
    );
}

/// Emitted when a spread factor is authorized or revoked
pub fn emit_spread_factor_updated(env: &Env, spread_factor: &Dec, authorized: bool) {
    env.events().publish(
        (Symbol::new(env, "SpreadFactorUpdated"),),
        (*spread_factor, authorized),
    );
}

/// Emitted when admin is updated
pub fn emit_admin_updated(env: &Env, old_admin: &Address, new_admin: &Address) {
    env.events().publish(
        (Symbol::new(env, "AdminUpdated"),),
        (old_admin.clone(), new_admin.clone()),
    );
}
