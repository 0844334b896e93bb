// Engine storage module

use soroban_sdk::{contracttype, vec, Address, BytesN, Env, Vec};
use tidepool_accum::IncentiveRecord;
use tidepool_math::tick_key;
use tidepool_position::Position;
use tidepool_tick::{
    insert_tick_key, next_initialized_in_index, remove_tick_key, TickError, TickInfo, TickReader,
    TickUpdate,
};

use crate::error::ErrorMsg;
use crate::types::{EngineConfig, PoolState};

// ============================================================
// STORAGE KEYS
// ============================================================

#[contracttype]
pub enum DataKey {
    Config,
    Initialized,
    AuthorizedUptimes,
    Pool(u64),
    /// Tick record by (pool id, encoded tick)
    Tick(u64, BytesN<5>),
    /// Sorted encoded ticks of one pool
    TickIndex(u64),
    Position(u64),
    NextPositionId,
    /// Position ids by (owner, pool id)
    OwnerPositions(Address, u64),
    PoolPositionCount(u64),
    IncentiveRecords(u64),
    NextIncentiveId,
}

// ============================================================
// TTL CONFIGURATION
// ============================================================

/// Persistent storage lifetime in ledgers (~1 year at 5s/ledger)
const PERSISTENT_LIFETIME: u32 = 6_307_200;
const PERSISTENT_BUMP: u32 = 6_307_200;

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME, PERSISTENT_BUMP);
}

// ============================================================
// INITIALIZATION AND CONFIG
// ============================================================

pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().persistent().set(&DataKey::Initialized, &true);
    extend_ttl(env, &DataKey::Initialized);
}

pub fn write_config(env: &Env, config: &EngineConfig) {
    env.storage().persistent().set(&DataKey::Config, config);
    extend_ttl(env, &DataKey::Config);
}

pub fn read_config(env: &Env) -> EngineConfig {
    env.storage()
        .persistent()
        .get(&DataKey::Config)
        .expect(ErrorMsg::NOT_INITIALIZED)
}

pub fn write_authorized_uptimes(env: &Env, uptimes: &Vec<u64>) {
    env.storage().persistent().set(&DataKey::AuthorizedUptimes, uptimes);
    extend_ttl(env, &DataKey::AuthorizedUptimes);
}

/// Defaults to the one-second tier only
pub fn read_authorized_uptimes(env: &Env) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::AuthorizedUptimes)
        .unwrap_or_else(|| vec![env, 1u64])
}

// ============================================================
// POOLS
// ============================================================

pub fn pool_exists(env: &Env, pool_id: u64) -> bool {
    env.storage().persistent().has(&DataKey::Pool(pool_id))
}

pub fn read_pool(env: &Env, pool_id: u64) -> Option<PoolState> {
    let key = DataKey::Pool(pool_id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_ttl(env, &key);
    }
    result
}

pub fn write_pool(env: &Env, pool: &PoolState) {
    let key = DataKey::Pool(pool.id);
    env.storage().persistent().set(&key, pool);
    extend_ttl(env, &key);
}

// ============================================================
// TICKS
// ============================================================

pub fn read_tick(env: &Env, pool_id: u64, tick: i32) -> Option<TickInfo> {
    let key = DataKey::Tick(pool_id, tick_key(env, tick));
    env.storage().persistent().get(&key)
}

pub fn write_tick(env: &Env, pool_id: u64, tick: i32, info: &TickInfo) {
    let key = DataKey::Tick(pool_id, tick_key(env, tick));
    env.storage().persistent().set(&key, info);
    extend_ttl(env, &key);
}

pub fn remove_tick(env: &Env, pool_id: u64, tick: i32) {
    let key = DataKey::Tick(pool_id, tick_key(env, tick));
    env.storage().persistent().remove(&key);
}

pub fn read_tick_index(env: &Env, pool_id: u64) -> Vec<BytesN<5>> {
    env.storage()
        .persistent()
        .get(&DataKey::TickIndex(pool_id))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_tick_index(env: &Env, pool_id: u64, index: &Vec<BytesN<5>>) {
    let key = DataKey::TickIndex(pool_id);
    env.storage().persistent().set(&key, index);
    extend_ttl(env, &key);
}

/// Persist a tick update, deleting emptied ticks and keeping the index in
/// step. The caller writes the index back.
pub fn apply_tick_update(
    env: &Env,
    pool_id: u64,
    tick: i32,
    update: &TickUpdate,
    index: &mut Vec<BytesN<5>>,
) {
    if update.emptied {
        remove_tick(env, pool_id, tick);
        remove_tick_key(env, index, tick);
    } else {
        write_tick(env, pool_id, tick, &update.info);
        if update.initialized {
            insert_tick_key(env, index, tick);
        }
    }
}

/// Ticks of one pool as seen from persistent storage
pub struct StoredTicks<'a> {
    env: &'a Env,
    pool_id: u64,
    index: Vec<BytesN<5>>,
}

impl<'a> StoredTicks<'a> {
    pub fn load(env: &'a Env, pool_id: u64) -> Self {
        Self {
            env,
            pool_id,
            index: read_tick_index(env, pool_id),
        }
    }
}

impl TickReader for StoredTicks<'_> {
    fn tick_info(&self, tick: i32) -> Result<Option<TickInfo>, TickError> {
        Ok(read_tick(self.env, self.pool_id, tick))
    }

    fn next_initialized_tick(&self, from: i32, leftward: bool) -> Result<Option<i32>, TickError> {
        next_initialized_in_index(self.env, &self.index, from, leftward)
    }
}

// ============================================================
// POSITIONS
// ============================================================

pub fn read_position(env: &Env, position_id: u64) -> Option<Position> {
    let key = DataKey::Position(position_id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_ttl(env, &key);
    }
    result
}

pub fn write_position(env: &Env, position: &Position) {
    let key = DataKey::Position(position.id);
    env.storage().persistent().set(&key, position);
    extend_ttl(env, &key);
}

/// Allocate the next position id, starting at 1
pub fn next_position_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .persistent()
        .get(&DataKey::NextPositionId)
        .unwrap_or(1);
    env.storage().persistent().set(&DataKey::NextPositionId, &(id + 1));
    extend_ttl(env, &DataKey::NextPositionId);
    id
}

pub fn read_owner_positions(env: &Env, owner: &Address, pool_id: u64) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::OwnerPositions(owner.clone(), pool_id))
        .unwrap_or_else(|| Vec::new(env))
}

fn write_owner_positions(env: &Env, owner: &Address, pool_id: u64, ids: &Vec<u64>) {
    let key = DataKey::OwnerPositions(owner.clone(), pool_id);
    if ids.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, ids);
        extend_ttl(env, &key);
    }
}

pub fn read_pool_position_count(env: &Env, pool_id: u64) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::PoolPositionCount(pool_id))
        .unwrap_or(0)
}

fn write_pool_position_count(env: &Env, pool_id: u64, count: u64) {
    let key = DataKey::PoolPositionCount(pool_id);
    env.storage().persistent().set(&key, &count);
    extend_ttl(env, &key);
}

/// Store a new position and index it under its owner and pool
pub fn insert_position(env: &Env, position: &Position) {
    write_position(env, position);

    let mut ids = read_owner_positions(env, &position.owner, position.pool_id);
    ids.push_back(position.id);
    write_owner_positions(env, &position.owner, position.pool_id, &ids);

    let count = read_pool_position_count(env, position.pool_id);
    write_pool_position_count(env, position.pool_id, count + 1);
}

/// Delete a position and its index entries. Returns the pool's remaining
/// position count.
pub fn delete_position(env: &Env, position: &Position) -> u64 {
    env.storage()
        .persistent()
        .remove(&DataKey::Position(position.id));

    let mut ids = read_owner_positions(env, &position.owner, position.pool_id);
    if let Some(i) = ids.first_index_of(position.id) {
        ids.remove(i);
    }
    write_owner_positions(env, &position.owner, position.pool_id, &ids);

    let count = read_pool_position_count(env, position.pool_id).saturating_sub(1);
    write_pool_position_count(env, position.pool_id, count);
    count
}

// ============================================================
// INCENTIVES
// ============================================================

pub fn read_incentive_records(env: &Env, pool_id: u64) -> Vec<IncentiveRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::IncentiveRecords(pool_id))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_incentive_records(env: &Env, pool_id: u64, records: &Vec<IncentiveRecord>) {
    let key = DataKey::IncentiveRecords(pool_id);
    env.storage().persistent().set(&key, records);
    extend_ttl(env, &key);
}

pub fn next_incentive_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .persistent()
        .get(&DataKey::NextIncentiveId)
        .unwrap_or(1);
    env.storage().persistent().set(&DataKey::NextIncentiveId, &(id + 1));
    extend_ttl(env, &DataKey::NextIncentiveId);
    id
}
