// Registry error module

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FactoryError {
    // Initialization errors (1000-1099)
    AlreadyInitialized = 1000,
    NotInitialized = 1001,

    // Pool creation errors (1100-1199)
    PoolAlreadyExists = 1100,
    InvalidTokenPair = 1101,
    InvalidTickSpacing = 1102,
    InvalidSpreadFactor = 1103,
    UnauthorizedTickSpacing = 1104,
    UnauthorizedSpreadFactor = 1105,

    // Pool state errors (1500-1599)
    PoolNotFound = 1500,
}

/// Human-readable error messages for debugging
pub struct FactoryErrorMsg;

impl FactoryErrorMsg {
    pub const NOT_INITIALIZED: &'static str = "Registry: not initialized";
}
