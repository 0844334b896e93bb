// Registry storage module

use soroban_sdk::{contracttype, Address, Env};
use tidepool_math::Dec;

use crate::error::FactoryErrorMsg;
use crate::types::{FactoryConfig, PoolRecord};

// ============================================================
// STORAGE KEYS
// ============================================================

#[contracttype]
pub enum DataKey {
    Config,
    Initialized,
    /// Authorization flag by tick spacing
    TickSpacing(u32),
    /// Authorization flag by spread factor
    SpreadFactor(Dec),
    /// Pool id by (token0, token1, tick_spacing, spread_factor)
    PoolId(Address, Address, u32, Dec),
    /// Pool record by id
    Pool(u64),
    PoolCount,
}

// ============================================================
// TTL CONFIGURATION
// ============================================================

const PERSISTENT_LIFETIME: u32 = 6_307_200;
const PERSISTENT_BUMP: u32 = 6_307_200;

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage().persistent().extend_ttl(key, PERSISTENT_LIFETIME, PERSISTENT_BUMP);
}

// ============================================================
// INITIALIZATION
// ============================================================

pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().persistent().set(&DataKey::Initialized, &true);
    extend_ttl(env, &DataKey::Initialized);
}

// ============================================================
// CONFIG
// ============================================================

pub fn write_config(env: &Env, config: &FactoryConfig) {
    env.storage().persistent().set(&DataKey::Config, config);
    extend_ttl(env, &DataKey::Config);
}

pub fn read_config(env: &Env) -> FactoryConfig {
    env.storage()
        .persistent()
        .get(&DataKey::Config)
        .expect(FactoryErrorMsg::NOT_INITIALIZED)
}

// ============================================================
// PARAMETER STORE
// ============================================================

pub fn write_tick_spacing_authorized(env: &Env, tick_spacing: u32, authorized: bool) {
    let key = DataKey::TickSpacing(tick_spacing);
    env.storage().persistent().set(&key, &authorized);
    extend_ttl(env, &key);
}

pub fn read_tick_spacing_authorized(env: &Env, tick_spacing: u32) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::TickSpacing(tick_spacing))
        .unwrap_or(false)
}

pub fn write_spread_factor_authorized(env: &Env, spread_factor: &Dec, authorized: bool) {
    let key = DataKey::SpreadFactor(spread_factor.canonical());
    env.storage().persistent().set(&key, &authorized);
    extend_ttl(env, &key);
}

pub fn read_spread_factor_authorized(env: &Env, spread_factor: &Dec) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::SpreadFactor(spread_factor.canonical()))
        .unwrap_or(false)
}

// ============================================================
// POOL REGISTRY
// ============================================================

fn pool_id_key(token0: &Address, token1: &Address, tick_spacing: u32, spread_factor: &Dec) -> DataKey {
    // Identity is the unordered pair
    let (a, b) = if token0 < token1 {
        (token0.clone(), token1.clone())
    } else {
        (token1.clone(), token0.clone())
    };
    DataKey::PoolId(a, b, tick_spacing, spread_factor.canonical())
}

pub fn read_pool_id(
    env: &Env,
    token0: &Address,
    token1: &Address,
    tick_spacing: u32,
    spread_factor: &Dec,
) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&pool_id_key(token0, token1, tick_spacing, spread_factor))
}

pub fn read_pool(env: &Env, pool_id: u64) -> Option<PoolRecord> {
    env.storage().persistent().get(&DataKey::Pool(pool_id))
}

pub fn read_pool_count(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::PoolCount)
        .unwrap_or(0)
}

/// Store a new pool record under its id and its pair key
pub fn register_pool(env: &Env, record: &PoolRecord) {
    let key = DataKey::Pool(record.pool_id);
    env.storage().persistent().set(&key, record);
    extend_ttl(env, &key);

    let id_key = pool_id_key(&record.token0, &record.token1, record.tick_spacing, &record.spread_factor);
    env.storage().persistent().set(&id_key, &record.pool_id);
    extend_ttl(env, &id_key);

    env.storage().persistent().set(&DataKey::PoolCount, &record.pool_id);
    extend_ttl(env, &DataKey::PoolCount);
}
