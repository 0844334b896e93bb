// Tick Reader

use soroban_sdk::{Env, Map};

use crate::error::TickError;
use crate::index::neighbor_position;
use crate::types::TickInfo;

/// Read-only view of one pool's ticks, as needed by the swap loop.
pub trait TickReader {
    fn tick_info(&self, tick: i32) -> Result<Option<TickInfo>, TickError>;

    /// Leftward: greatest initialized tick <= `from`.
    /// Rightward: least initialized tick > `from`.
    fn next_initialized_tick(&self, from: i32, leftward: bool) -> Result<Option<i32>, TickError>;
}

/// Ticks held in a host map, for quotes over a snapshot and for tests.
#[derive(Clone)]
pub struct TickMap {
    pub ticks: Map<i32, TickInfo>,
}

impl TickMap {
    pub fn new(env: &Env) -> Self {
        Self { ticks: Map::new(env) }
    }

    pub fn set(&mut self, tick: i32, info: TickInfo) {
        if info.is_initialized() {
            self.ticks.set(tick, info);
        } else {
            self.ticks.remove(tick);
        }
    }
}

impl TickReader for TickMap {
    fn tick_info(&self, tick: i32) -> Result<Option<TickInfo>, TickError> {
        Ok(self.ticks.get(tick))
    }

    fn next_initialized_tick(&self, from: i32, leftward: bool) -> Result<Option<i32>, TickError> {
        let keys = self.ticks.keys();
        let search = keys.binary_search(from);
        Ok(neighbor_position(search, keys.len(), leftward).and_then(|i| keys.get(i)))
    }
}
