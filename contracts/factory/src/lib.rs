#![no_std]

//! # Tidepool Registry
//!
//! Entry point for pool creation and swaps on the engine.
//!
//! ## Responsibilities:
//! 1. Allocate pool ids and create pools on the engine
//! 2. Parameter store (authorized tick spacings and spread factors)
//! 3. Duplicate prevention per pair and parameters
//! 4. Swap dispatch into the engine

use soroban_sdk::{contract, contractimpl, vec, Address, Env, IntoVal, Symbol};
use tidepool_math::Dec;

mod error;
mod events;
mod storage;
mod types;

pub use error::FactoryError;
use events::*;
use storage::*;
pub use types::*;

// ============================================================
// CONSTANTS
// ============================================================

/// Tick spacings authorized at initialization
const DEFAULT_TICK_SPACINGS: [u32; 4] = [1, 10, 100, 1000];

/// Spread factors authorized at initialization, in basis points
const DEFAULT_SPREAD_FACTORS_BPS: [i128; 7] = [0, 1, 5, 10, 20, 30, 50];

const BPS_DENOMINATOR: i128 = 10_000;

// ============================================================
// CONTRACT
// ============================================================

#[contract]
pub struct TidepoolFactory;

#[contractimpl]
impl TidepoolFactory {
    // ========================================================
    // WRITE FUNCTIONS
    // ========================================================

    /// Initialize registry
    ///
    /// # Arguments
    /// * `admin` - Manages the parameter store
    /// * `engine` - Engine contract; must name this registry as its creator
    pub fn initialize(env: Env, admin: Address, engine: Address) -> Result<(), FactoryError> {
        admin.require_auth();

        if is_initialized(&env) {
            return Err(FactoryError::AlreadyInitialized);
        }

        let config = FactoryConfig {
            admin: admin.clone(),
            engine: engine.clone(),
        };
        write_config(&env, &config);
        set_initialized(&env);

        Self::init_parameters(&env)?;

        emit_initialized(&env, &admin, &engine);
        Ok(())
    }

    /// Create a pool on the engine
    ///
    /// The pair is sorted unless `token_a_as_token0` is set. The pool has no
    /// price until its first position is created.
    pub fn create_pool(env: Env, creator: Address, params: CreatePoolParams) -> Result<u64, FactoryError> {
        creator.require_auth();

        if !is_initialized(&env) {
            return Err(FactoryError::NotInitialized);
        }

        if params.token_a == params.token_b {
            return Err(FactoryError::InvalidTokenPair);
        }
        let (token0, token1) = if params.token_a_as_token0 || params.token_a < params.token_b {
            (params.token_a, params.token_b)
        } else {
            (params.token_b, params.token_a)
        };

        if !read_tick_spacing_authorized(&env, params.tick_spacing) {
            return Err(FactoryError::UnauthorizedTickSpacing);
        }
        if !read_spread_factor_authorized(&env, &params.spread_factor) {
            return Err(FactoryError::UnauthorizedSpreadFactor);
        }
        if read_pool_id(&env, &token0, &token1, params.tick_spacing, &params.spread_factor).is_some() {
            return Err(FactoryError::PoolAlreadyExists);
        }

        let config = read_config(&env);
        let pool_id = read_pool_count(&env) + 1;

        // === CREATE ON ENGINE ===
        let _: u64 = env.invoke_contract(
            &config.engine,
            &Symbol::new(&env, "create_pool"),
            vec![
                &env,
                pool_id.into_val(&env),
                token0.clone().into_val(&env),
                token1.clone().into_val(&env),
                params.tick_spacing.into_val(&env),
                params.spread_factor.into_val(&env),
            ],
        );

        // === REGISTER POOL ===
        let record = PoolRecord {
            pool_id,
            token0: token0.clone(),
            token1: token1.clone(),
            tick_spacing: params.tick_spacing,
            spread_factor: params.spread_factor,
            creator: creator.clone(),
        };
        register_pool(&env, &record);

        emit_pool_created(
            &env,
            pool_id,
            &token0,
            &token1,
            &creator,
            params.tick_spacing,
            &params.spread_factor,
        );
        Ok(pool_id)
    }

    /// Swap an exact input amount on a registered pool
    pub fn swap_exact_amount_in(
        env: Env,
        sender: Address,
        pool_id: u64,
        token_in: Address,
        amount_in: i128,
        token_out_min_amount: i128,
        price_limit: Option<Dec>,
    ) -> Result<SwapResult, FactoryError> {
        sender.require_auth();
        let engine = Self::engine_for(&env, pool_id)?;

        Ok(env.invoke_contract(
            &engine,
            &Symbol::new(&env, "swap_exact_amount_in"),
            vec![
                &env,
                sender.into_val(&env),
                pool_id.into_val(&env),
                token_in.into_val(&env),
                amount_in.into_val(&env),
                token_out_min_amount.into_val(&env),
                price_limit.into_val(&env),
            ],
        ))
    }

    /// Swap for an exact output amount on a registered pool
    pub fn swap_exact_amount_out(
        env: Env,
        sender: Address,
        pool_id: u64,
        token_out: Address,
        amount_out: i128,
        token_in_max_amount: i128,
        price_limit: Option<Dec>,
    ) -> Result<SwapResult, FactoryError> {
        sender.require_auth();
        let engine = Self::engine_for(&env, pool_id)?;

        Ok(env.invoke_contract(
            &engine,
            &Symbol::new(&env, "swap_exact_amount_out"),
            vec![
                &env,
                sender.into_val(&env),
                pool_id.into_val(&env),
                token_out.into_val(&env),
                amount_out.into_val(&env),
                token_in_max_amount.into_val(&env),
                price_limit.into_val(&env),
            ],
        ))
    }

    // ========================================================
    // READ FUNCTIONS
    // ========================================================

    /// Get a pool record by id
    pub fn get_pool(env: Env, pool_id: u64) -> Result<PoolRecord, FactoryError> {
        read_pool(&env, pool_id).ok_or(FactoryError::PoolNotFound)
    }

    /// Get the number of pools created
    pub fn get_pool_count(env: Env) -> u64 {
        read_pool_count(&env)
    }

    /// Get a pool id by pair and parameters, in either token order
    pub fn get_pool_id(
        env: Env,
        token_a: Address,
        token_b: Address,
        tick_spacing: u32,
        spread_factor: Dec,
    ) -> Option<u64> {
        read_pool_id(&env, &token_a, &token_b, tick_spacing, &spread_factor)
    }

    pub fn is_tick_spacing_authorized(env: Env, tick_spacing: u32) -> bool {
        read_tick_spacing_authorized(&env, tick_spacing)
    }

    pub fn is_spread_factor_authorized(env: Env, spread_factor: Dec) -> bool {
        read_spread_factor_authorized(&env, &spread_factor)
    }

    pub fn get_engine(env: Env) -> Result<Address, FactoryError> {
        if !is_initialized(&env) {
            return Err(FactoryError::NotInitialized);
        }
        Ok(read_config(&env).engine)
    }

    // ========================================================
    // ADMIN FUNCTIONS
    // ========================================================

    /// Authorize or revoke a tick spacing for new pools
    pub fn set_tick_spacing_authorized(env: Env, tick_spacing: u32, authorized: bool) -> Result<(), FactoryError> {
        let config = Self::config(&env)?;
        config.admin.require_auth();

        if tick_spacing == 0 {
            return Err(FactoryError::InvalidTickSpacing);
        }

        write_tick_spacing_authorized(&env, tick_spacing, authorized);
        emit_tick_spacing_updated(&env, tick_spacing, authorized);
        Ok(())
    }

    /// Authorize or revoke a spread factor for new pools
    pub fn set_spread_factor_authorized(env: Env, spread_factor: Dec, authorized: bool) -> Result<(), FactoryError> {
        let config = Self::config(&env)?;
        config.admin.require_auth();

        if spread_factor.is_negative() || spread_factor >= Dec::one() {
            return Err(FactoryError::InvalidSpreadFactor);
        }

        write_spread_factor_authorized(&env, &spread_factor, authorized);
        emit_spread_factor_updated(&env, &spread_factor, authorized);
        Ok(())
    }

    /// Transfer admin role to new address
    /// Both old and new admin must authorize
    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), FactoryError> {
        let mut config = Self::config(&env)?;
        config.admin.require_auth();
        new_admin.require_auth();

        emit_admin_updated(&env, &config.admin, &new_admin);

        config.admin = new_admin;
        write_config(&env, &config);
        Ok(())
    }

    // ========================================================
    // INTERNAL HELPERS
    // ========================================================

    fn config(env: &Env) -> Result<FactoryConfig, FactoryError> {
        if !is_initialized(env) {
            return Err(FactoryError::NotInitialized);
        }
        Ok(read_config(env))
    }

    fn engine_for(env: &Env, pool_id: u64) -> Result<Address, FactoryError> {
        let config = Self::config(env)?;
        read_pool(env, pool_id).ok_or(FactoryError::PoolNotFound)?;
        Ok(config.engine)
    }

    fn init_parameters(env: &Env) -> Result<(), FactoryError> {
        for tick_spacing in DEFAULT_TICK_SPACINGS {
            write_tick_spacing_authorized(env, tick_spacing, true);
        }

        let denominator = Dec::from_int(BPS_DENOMINATOR);
        for bps in DEFAULT_SPREAD_FACTORS_BPS {
            let spread_factor = Dec::from_int(bps)
                .quo(&denominator)
                .map_err(|_| FactoryError::InvalidSpreadFactor)?;
            write_spread_factor_authorized(env, &spread_factor, true);
        }
        Ok(())
    }
}
