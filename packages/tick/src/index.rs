// Sorted Tick Index
//
// Each pool keeps its initialized ticks as a Vec of encoded keys in byte
// order, which is numeric order (see tidepool_math::tick_key).

use soroban_sdk::{BytesN, Env, Vec};
use tidepool_math::{tick_from_key, tick_key};

use crate::error::TickError;

/// Position of the neighbor for a binary search result.
///
/// Leftward picks the greatest entry <= the target, rightward the least
/// entry strictly greater than it.
pub fn neighbor_position(search: Result<u32, u32>, len: u32, leftward: bool) -> Option<u32> {
    let position = match (search, leftward) {
        (Ok(i), true) => i,
        (Err(0), true) => return None,
        (Err(i), true) => i - 1,
        (Ok(i), false) => i + 1,
        (Err(i), false) => i,
    };
    if position < len { Some(position) } else { None }
}

pub fn next_initialized_in_index(
    env: &Env,
    index: &Vec<BytesN<5>>,
    from: i32,
    leftward: bool,
) -> Result<Option<i32>, TickError> {
    let search = index.binary_search(tick_key(env, from));
    match neighbor_position(search, index.len(), leftward) {
        Some(position) => match index.get(position) {
            Some(key) => Ok(Some(tick_from_key(&key)?)),
            None => Ok(None),
        },
        None => Ok(None),
    }
}

/// Insert a tick, keeping order. Returns false if it was already present.
pub fn insert_tick_key(env: &Env, index: &mut Vec<BytesN<5>>, tick: i32) -> bool {
    match index.binary_search(tick_key(env, tick)) {
        Ok(_) => false,
        Err(position) => {
            index.insert(position, tick_key(env, tick));
            true
        }
    }
}

/// Remove a tick. Returns false if it was not present.
pub fn remove_tick_key(env: &Env, index: &mut Vec<BytesN<5>>, tick: i32) -> bool {
    match index.binary_search(tick_key(env, tick)) {
        Ok(position) => {
            index.remove(position);
            true
        }
        Err(_) => false,
    }
}
