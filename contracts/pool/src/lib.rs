#![no_std]

//! # Tidepool Engine
//!
//! Concentrated-liquidity pools keyed by id.
//!
//! ## Responsibilities:
//! 1. Pool state and the per-pool tick ledger
//! 2. Position lifecycle (create, add, withdraw, fungify)
//! 3. Swaps, exact in and exact out, with quotes
//! 4. Spread reward and uptime incentive accounting

use soroban_sdk::{contract, contractimpl, token, vec, Address, Env, Map, Vec};
use tidepool_accum::{
    empty_coins, empty_uptime_growth, sync_uptime_accumulators, truncate_coins, uptime_index,
    Accumulator, DecCoins, IncentiveRecord, UptimeGrowth, UptimeSync,
};
use tidepool_math::{
    amounts_for_liquidity, liquidity_from_amounts, tick_from_key, tick_to_sqrt_price, Dec,
    EXPONENT_AT_PRICE_ONE,
};
use tidepool_position::{
    carry_remainder, carry_uptime_remainder, fungified_snapshots, incentive_settlement,
    initial_sqrt_price, is_active, redeposit_forfeited, spread_reward_claim, validate_fungible,
    validate_range, Position,
};
use tidepool_swap::{
    compute_swap, resolve_sqrt_price_limit, SwapOutcome, SwapParams, SwapResult, SwapState,
};
use tidepool_tick::{
    spread_reward_growth_inside, update_tick_with_liquidity, uptime_growth_inside, TickInfo,
};

mod error;
mod events;
mod storage;
pub mod types;

pub use error::PoolError;
use events::*;
use storage::*;
pub use types::*;

/// Active incentive records a pool may hold; every sync walks all of them
const MAX_INCENTIVE_RECORDS: u32 = 32;

#[contract]
pub struct TidepoolPool;

#[contractimpl]
impl TidepoolPool {
    // ========================================================
    // ADMIN FUNCTIONS
    // ========================================================

    /// Initialize the engine
    ///
    /// # Arguments
    /// * `admin` - May change the authorized uptimes
    /// * `registry` - Pool registry contract, the only pool creator
    pub fn initialize(env: Env, admin: Address, registry: Address) -> Result<(), PoolError> {
        admin.require_auth();

        if is_initialized(&env) {
            return Err(PoolError::AlreadyInitialized);
        }

        write_config(
            &env,
            &EngineConfig {
                admin: admin.clone(),
                registry: registry.clone(),
            },
        );
        write_authorized_uptimes(&env, &vec![&env, 1u64]);
        set_initialized(&env);

        emit_initialized(&env, &admin, &registry);
        Ok(())
    }

    /// Replace the set of uptimes incentives may be created for
    pub fn set_authorized_uptimes(env: Env, uptimes: Vec<u64>) -> Result<(), PoolError> {
        let config = load_config(&env)?;
        config.admin.require_auth();

        if uptimes.is_empty() {
            return Err(PoolError::UnsupportedUptime);
        }
        for uptime in uptimes.iter() {
            uptime_index(uptime).ok_or(PoolError::UnsupportedUptime)?;
        }

        write_authorized_uptimes(&env, &uptimes);
        emit_uptimes_set(&env, &uptimes);
        Ok(())
    }

    /// Create an empty pool. Called by the registry, which allocates ids.
    ///
    /// The pool has no price until its first position is created.
    pub fn create_pool(
        env: Env,
        pool_id: u64,
        token0: Address,
        token1: Address,
        tick_spacing: u32,
        spread_factor: Dec,
    ) -> Result<u64, PoolError> {
        let config = load_config(&env)?;
        config.registry.require_auth();

        if token0 == token1 {
            return Err(PoolError::InvalidTokenPair);
        }
        if tick_spacing == 0 {
            return Err(PoolError::InvalidTickSpacing);
        }
        if spread_factor.is_negative() || spread_factor >= Dec::one() {
            return Err(PoolError::InvalidSpreadFactor);
        }
        if pool_exists(&env, pool_id) {
            return Err(PoolError::PoolAlreadyExists);
        }

        let pool = PoolState {
            id: pool_id,
            token0,
            token1,
            tick_spacing,
            exponent_at_price_one: EXPONENT_AT_PRICE_ONE,
            spread_factor,
            sqrt_price: Dec::zero(),
            current_tick: 0,
            liquidity: Dec::zero(),
            last_liquidity_update: env.ledger().timestamp(),
            spread_reward_growth: empty_coins(&env),
            uptime_growth: empty_uptime_growth(&env),
        };
        write_pool(&env, &pool);

        emit_pool_created(
            &env,
            pool_id,
            &pool.token0,
            &pool.token1,
            tick_spacing,
            &spread_factor,
        );
        Ok(pool_id)
    }

    // ========================================================
    // POSITIONS
    // ========================================================

    /// Open a position over [lower_tick, upper_tick)
    ///
    /// The first position of a pool sets its price from
    /// amount1_desired / amount0_desired.
    pub fn create_position(
        env: Env,
        owner: Address,
        pool_id: u64,
        lower_tick: i32,
        upper_tick: i32,
        amount0_desired: i128,
        amount1_desired: i128,
        amount0_min: i128,
        amount1_min: i128,
    ) -> Result<PositionResult, PoolError> {
        owner.require_auth();

        let mut pool = load_pool(&env, pool_id)?;
        validate_range(lower_tick, upper_tick, pool.tick_spacing)?;
        validate_amounts(amount0_desired, amount1_desired, amount0_min, amount1_min)?;

        let now = env.ledger().timestamp();
        sync_pool(&env, &mut pool, now)?;

        if !pool.has_price() {
            let (sqrt_price, tick) = initial_sqrt_price(amount0_desired, amount1_desired)?;
            pool.sqrt_price = sqrt_price;
            pool.current_tick = tick;
        }

        let liquidity = liquidity_for(&pool, lower_tick, upper_tick, amount0_desired, amount1_desired)?;
        let (amount0, amount1) = modify_liquidity(&env, &mut pool, lower_tick, upper_tick, &liquidity)?;
        if amount0 < amount0_min || amount1 < amount1_min {
            return Err(PoolError::InsufficientAmount);
        }

        let (spread_inside, uptime_inside) = growth_inside_range(&env, &pool, lower_tick, upper_tick)?;
        let position = Position {
            id: next_position_id(&env),
            pool_id,
            owner: owner.clone(),
            lower_tick,
            upper_tick,
            liquidity,
            join_time: now,
            spread_reward_snapshot: spread_inside,
            uptime_snapshots: uptime_inside,
        };
        insert_position(&env, &position);
        write_pool(&env, &pool);

        transfer_in(&env, &pool.token0, &owner, amount0);
        transfer_in(&env, &pool.token1, &owner, amount1);

        emit_position_created(
            &env,
            pool_id,
            position.id,
            &owner,
            lower_tick,
            upper_tick,
            &liquidity,
            amount0,
            amount1,
        );

        Ok(PositionResult {
            position_id: position.id,
            amount0,
            amount1,
            liquidity_delta: liquidity,
            lower_tick,
            upper_tick,
            join_time: now,
        })
    }

    /// Add liquidity to an existing position
    ///
    /// Outstanding rewards are paid out first. The position's uptime clock
    /// restarts, so incentives in tiers it no longer qualifies for are
    /// forfeited.
    pub fn add_to_position(
        env: Env,
        owner: Address,
        position_id: u64,
        amount0_desired: i128,
        amount1_desired: i128,
        amount0_min: i128,
        amount1_min: i128,
    ) -> Result<PositionResult, PoolError> {
        owner.require_auth();

        let mut position = load_owned_position(&env, &owner, position_id)?;
        let mut pool = load_pool(&env, position.pool_id)?;
        validate_amounts(amount0_desired, amount1_desired, amount0_min, amount1_min)?;

        let now = env.ledger().timestamp();
        sync_pool(&env, &mut pool, now)?;

        let (lower_tick, upper_tick) = (position.lower_tick, position.upper_tick);
        let liquidity = liquidity_for(&pool, lower_tick, upper_tick, amount0_desired, amount1_desired)?;
        let liquidity_after = position.liquidity.checked_add(&liquidity)?;
        let (spread, incentives) = settle_position(&env, &mut pool, &mut position, now, &liquidity_after)?;

        // Existing boundary ticks keep their growth, so the settled
        // snapshots stay valid across the liquidity change.
        let (amount0, amount1) = modify_liquidity(&env, &mut pool, lower_tick, upper_tick, &liquidity)?;
        if amount0 < amount0_min || amount1 < amount1_min {
            return Err(PoolError::InsufficientAmount);
        }

        position.liquidity = liquidity_after;
        position.join_time = now;
        write_position(&env, &position);
        write_pool(&env, &pool);

        transfer_in(&env, &pool.token0, &owner, amount0);
        transfer_in(&env, &pool.token1, &owner, amount1);
        pay_out_spread(&env, position_id, &owner, &spread);
        pay_out_incentives(&env, position_id, &owner, &incentives);

        emit_position_added(&env, position_id, &liquidity, amount0, amount1);

        Ok(PositionResult {
            position_id,
            amount0,
            amount1,
            liquidity_delta: liquidity,
            lower_tick,
            upper_tick,
            join_time: now,
        })
    }

    /// Withdraw liquidity from a position
    ///
    /// Outstanding rewards are paid out first. Withdrawing everything
    /// deletes the position; removing a pool's last position clears its
    /// price.
    pub fn withdraw_position(
        env: Env,
        owner: Address,
        position_id: u64,
        liquidity_amount: Dec,
    ) -> Result<WithdrawResult, PoolError> {
        owner.require_auth();

        let mut position = load_owned_position(&env, &owner, position_id)?;
        if !liquidity_amount.is_positive() {
            return Err(PoolError::InvalidAmount);
        }
        if liquidity_amount > position.liquidity {
            return Err(PoolError::InsufficientPositionLiquidity);
        }

        let mut pool = load_pool(&env, position.pool_id)?;
        let now = env.ledger().timestamp();
        sync_pool(&env, &mut pool, now)?;
        let liquidity_after = position.liquidity.checked_sub_non_negative(&liquidity_amount)?;
        let (spread, incentives) = settle_position(&env, &mut pool, &mut position, now, &liquidity_after)?;

        let (amount0, amount1) = modify_liquidity(
            &env,
            &mut pool,
            position.lower_tick,
            position.upper_tick,
            &liquidity_amount.neg(),
        )?;

        position.liquidity = liquidity_after;
        let closed = position.liquidity.is_zero();
        if closed {
            if delete_position(&env, &position) == 0 {
                pool.sqrt_price = Dec::zero();
                pool.current_tick = 0;
            }
        } else {
            write_position(&env, &position);
        }
        write_pool(&env, &pool);

        transfer_out(&env, &pool.token0, &owner, amount0);
        transfer_out(&env, &pool.token1, &owner, amount1);
        pay_out_spread(&env, position_id, &owner, &spread);
        pay_out_incentives(&env, position_id, &owner, &incentives);

        emit_position_withdrawn(&env, position_id, &liquidity_amount, amount0, amount1, closed);

        Ok(WithdrawResult {
            amount0,
            amount1,
            closed,
        })
    }

    /// Merge fully charged positions of one owner over the same range
    ///
    /// Unclaimed rewards carry over to the merged position. Ticks and pool
    /// liquidity do not change.
    pub fn fungify_positions(env: Env, owner: Address, position_ids: Vec<u64>) -> Result<u64, PoolError> {
        owner.require_auth();

        let mut positions = Vec::new(&env);
        for (i, id) in position_ids.iter().enumerate() {
            if position_ids.slice(..i as u32).contains(id) {
                return Err(PoolError::PositionsNotFungible);
            }
            positions.push_back(read_position(&env, id).ok_or(PoolError::PositionNotFound)?);
        }

        let now = env.ledger().timestamp();
        let fully_charged_after = longest_authorized_uptime(&env);
        validate_fungible(&positions, &owner, now, fully_charged_after)?;

        let first = positions.get(0).ok_or(PoolError::TooFewPositions)?;
        let (liquidity, spread_snapshot, uptime_snapshots) = fungified_snapshots(&env, &positions)?;

        for position in positions.iter() {
            delete_position(&env, &position);
        }

        let merged = Position {
            id: next_position_id(&env),
            pool_id: first.pool_id,
            owner: owner.clone(),
            lower_tick: first.lower_tick,
            upper_tick: first.upper_tick,
            liquidity,
            join_time: now.saturating_sub(fully_charged_after),
            spread_reward_snapshot: spread_snapshot,
            uptime_snapshots,
        };
        insert_position(&env, &merged);

        emit_positions_fungified(&env, &owner, &position_ids, merged.id);
        Ok(merged.id)
    }

    // ========================================================
    // SWAPS
    // ========================================================

    /// Swap an exact amount of `token_in`
    ///
    /// # Arguments
    /// * `price_limit` - Spot price the swap may not move past; None for
    ///   the global bound in the trade direction
    pub fn swap_exact_amount_in(
        env: Env,
        sender: Address,
        pool_id: u64,
        token_in: Address,
        amount_in: i128,
        token_out_min_amount: i128,
        price_limit: Option<Dec>,
    ) -> Result<SwapResult, PoolError> {
        sender.require_auth();

        let (mut pool, outcome, zero_for_one) =
            run_swap(&env, pool_id, &token_in, amount_in, true, price_limit, true)?;
        if outcome.amount_out < token_out_min_amount {
            return Err(PoolError::SlippageExceeded);
        }

        commit_swap(&env, &mut pool, &outcome, &sender, zero_for_one)
    }

    /// Swap for an exact amount of `token_out`
    pub fn swap_exact_amount_out(
        env: Env,
        sender: Address,
        pool_id: u64,
        token_out: Address,
        amount_out: i128,
        token_in_max_amount: i128,
        price_limit: Option<Dec>,
    ) -> Result<SwapResult, PoolError> {
        sender.require_auth();

        let (mut pool, outcome, zero_for_one) =
            run_swap(&env, pool_id, &token_out, amount_out, false, price_limit, true)?;
        if outcome.amount_in > token_in_max_amount {
            return Err(PoolError::SlippageExceeded);
        }

        commit_swap(&env, &mut pool, &outcome, &sender, zero_for_one)
    }

    /// Quote an exact-in swap without changing state
    pub fn calc_out_amt_given_in(
        env: Env,
        pool_id: u64,
        token_in: Address,
        amount_in: i128,
        price_limit: Option<Dec>,
    ) -> Result<SwapResult, PoolError> {
        let (_, outcome, _) = run_swap(&env, pool_id, &token_in, amount_in, true, price_limit, false)?;
        Ok(outcome.to_result())
    }

    /// Quote an exact-out swap without changing state
    pub fn calc_in_amt_given_out(
        env: Env,
        pool_id: u64,
        token_out: Address,
        amount_out: i128,
        price_limit: Option<Dec>,
    ) -> Result<SwapResult, PoolError> {
        let (_, outcome, _) = run_swap(&env, pool_id, &token_out, amount_out, false, price_limit, false)?;
        Ok(outcome.to_result())
    }

    // ========================================================
    // REWARDS
    // ========================================================

    /// Pay out spread rewards earned by a position
    pub fn collect_spread_rewards(
        env: Env,
        owner: Address,
        position_id: u64,
    ) -> Result<Map<Address, i128>, PoolError> {
        owner.require_auth();

        let mut position = load_owned_position(&env, &owner, position_id)?;
        let pool = load_pool(&env, position.pool_id)?;

        let (spread_inside, _) = growth_inside_range(&env, &pool, position.lower_tick, position.upper_tick)?;
        let claim = spread_reward_claim(&position, &spread_inside)?;
        let amounts = truncate_coins(&claim)?;
        position.spread_reward_snapshot = carry_remainder(&spread_inside, &claim, &position.liquidity)?;
        write_position(&env, &position);

        pay_out_spread(&env, position_id, &owner, &amounts);
        Ok(amounts)
    }

    /// Pay out incentives earned by a position
    ///
    /// Amounts from tiers longer than the position's age are forfeited to
    /// the rest of the pool.
    pub fn collect_incentives(
        env: Env,
        owner: Address,
        position_id: u64,
    ) -> Result<Map<Address, i128>, PoolError> {
        owner.require_auth();

        let mut position = load_owned_position(&env, &owner, position_id)?;
        let mut pool = load_pool(&env, position.pool_id)?;

        let now = env.ledger().timestamp();
        sync_pool(&env, &mut pool, now)?;
        let (_, uptime_inside) = growth_inside_range(&env, &pool, position.lower_tick, position.upper_tick)?;
        let liquidity = position.liquidity;
        let amounts = settle_incentives(&env, &mut pool, &mut position, &uptime_inside, now, &liquidity)?;

        write_position(&env, &position);
        write_pool(&env, &pool);

        pay_out_incentives(&env, position_id, &owner, &amounts);
        Ok(amounts)
    }

    /// Fund an incentive stream for one pool and uptime tier
    ///
    /// # Arguments
    /// * `amount` - Total to emit, transferred from `sender` now
    /// * `emission_rate` - Tokens emitted per second
    /// * `start_time` - Ledger timestamp emission starts at, not in the past
    /// * `min_uptime` - Authorized uptime a position needs to qualify
    pub fn create_incentive(
        env: Env,
        sender: Address,
        pool_id: u64,
        token: Address,
        amount: i128,
        emission_rate: Dec,
        start_time: u64,
        min_uptime: u64,
    ) -> Result<IncentiveRecord, PoolError> {
        sender.require_auth();

        let mut pool = load_pool(&env, pool_id)?;
        if amount <= 0 {
            return Err(PoolError::InvalidIncentiveAmount);
        }
        if !emission_rate.is_positive() {
            return Err(PoolError::InvalidEmissionRate);
        }
        let now = env.ledger().timestamp();
        if start_time < now {
            return Err(PoolError::InvalidStartTime);
        }
        uptime_index(min_uptime).ok_or(PoolError::UnsupportedUptime)?;
        if !read_authorized_uptimes(&env).contains(min_uptime) {
            return Err(PoolError::UnauthorizedUptime);
        }

        sync_pool(&env, &mut pool, now)?;

        let mut records = read_incentive_records(&env, pool_id);
        if records.len() >= MAX_INCENTIVE_RECORDS {
            return Err(PoolError::TooManyIncentives);
        }

        let record = IncentiveRecord {
            id: next_incentive_id(&env),
            pool_id,
            token: token.clone(),
            remaining: Dec::from_int(amount),
            emission_rate,
            start_time,
            min_uptime,
        };
        records.push_back(record.clone());
        write_incentive_records(&env, pool_id, &records);
        write_pool(&env, &pool);

        transfer_in(&env, &token, &sender, amount);

        emit_incentive_created(
            &env,
            pool_id,
            record.id,
            &token,
            amount,
            &emission_rate,
            start_time,
            min_uptime,
        );
        Ok(record)
    }

    /// Bring a pool's uptime accumulators up to the current ledger time
    pub fn sync_uptime_accumulators(env: Env, pool_id: u64) -> Result<(), PoolError> {
        let mut pool = load_pool(&env, pool_id)?;
        sync_pool(&env, &mut pool, env.ledger().timestamp())?;
        write_pool(&env, &pool);
        Ok(())
    }

    // ========================================================
    // VIEW FUNCTIONS
    // ========================================================

    pub fn get_pool(env: Env, pool_id: u64) -> Result<PoolState, PoolError> {
        load_pool(&env, pool_id)
    }

    pub fn get_position(env: Env, position_id: u64) -> Result<Position, PoolError> {
        read_position(&env, position_id).ok_or(PoolError::PositionNotFound)
    }

    /// Positions of `owner` in one pool, oldest first
    pub fn get_user_positions(env: Env, owner: Address, pool_id: u64) -> Vec<Position> {
        let mut positions = Vec::new(&env);
        for id in read_owner_positions(&env, &owner, pool_id).iter() {
            if let Some(position) = read_position(&env, id) {
                positions.push_back(position);
            }
        }
        positions
    }

    pub fn get_tick(env: Env, pool_id: u64, tick: i32) -> Option<TickInfo> {
        read_tick(&env, pool_id, tick)
    }

    /// Initialized ticks of a pool in ascending order
    pub fn get_initialized_ticks(env: Env, pool_id: u64) -> Result<Vec<i32>, PoolError> {
        let mut ticks = Vec::new(&env);
        for key in read_tick_index(&env, pool_id).iter() {
            ticks.push_back(tick_from_key(&key)?);
        }
        Ok(ticks)
    }

    /// Spot price of token0 in token1
    pub fn calc_spot_price(env: Env, pool_id: u64) -> Result<Dec, PoolError> {
        let pool = load_pool(&env, pool_id)?;
        if !pool.has_price() {
            return Err(PoolError::NoLiquidity);
        }
        Ok(pool.sqrt_price.mul(&pool.sqrt_price)?)
    }

    /// Token amounts held by all positions of a pool at its current price
    pub fn get_total_liquidity(env: Env, pool_id: u64) -> Result<PoolLiquidity, PoolError> {
        let pool = load_pool(&env, pool_id)?;

        let mut amount0 = Dec::zero();
        let mut amount1 = Dec::zero();
        let mut liquidity = Dec::zero();
        let mut lower_tick: Option<i32> = None;

        // Walk the ranges between adjacent initialized ticks, carrying the
        // liquidity active in each one.
        for key in read_tick_index(&env, pool_id).iter() {
            let tick = tick_from_key(&key)?;
            if let Some(lower) = lower_tick {
                if liquidity.is_positive() {
                    let (range0, range1) = amounts_for_liquidity(
                        &pool.sqrt_price,
                        pool.current_tick,
                        lower,
                        tick,
                        &liquidity.neg(),
                    )?;
                    amount0 = amount0.checked_add(&range0)?;
                    amount1 = amount1.checked_add(&range1)?;
                }
            }
            let info = read_tick(&env, pool_id, tick).ok_or(PoolError::TickNotFound)?;
            liquidity = liquidity.checked_add(&info.liquidity_net)?;
            lower_tick = Some(tick);
        }

        Ok(PoolLiquidity {
            amount0: amount0.truncate_int()?,
            amount1: amount1.truncate_int()?,
        })
    }

    /// Initialized ticks a swap would cross, in crossing order
    ///
    /// # Arguments
    /// * `zero_for_one` - Direction of the swap; true walks down from the
    ///   current tick, false walks up
    /// * `bound_tick` - Last tick to include; None for no bound
    pub fn get_liquidity_net_in_direction(
        env: Env,
        pool_id: u64,
        zero_for_one: bool,
        bound_tick: Option<i32>,
    ) -> Result<Vec<TickLiquidityNet>, PoolError> {
        let pool = load_pool(&env, pool_id)?;
        if let Some(bound) = bound_tick {
            let behind = if zero_for_one {
                bound > pool.current_tick
            } else {
                bound <= pool.current_tick
            };
            if behind {
                return Err(PoolError::InvalidTickRange);
            }
        }

        let index = read_tick_index(&env, pool_id);
        let mut ticks = Vec::new(&env);
        for i in 0..index.len() {
            let position = if zero_for_one { index.len() - 1 - i } else { i };
            let key = index.get(position).ok_or(PoolError::InvalidTickKey)?;
            let tick = tick_from_key(&key)?;

            let ahead = if zero_for_one {
                tick <= pool.current_tick
            } else {
                tick > pool.current_tick
            };
            if !ahead {
                continue;
            }
            let past_bound = match bound_tick {
                Some(bound) if zero_for_one => tick < bound,
                Some(bound) => tick > bound,
                None => false,
            };
            if past_bound {
                break;
            }

            let info = read_tick(&env, pool_id, tick).ok_or(PoolError::TickNotFound)?;
            ticks.push_back(TickLiquidityNet {
                tick,
                liquidity_net: info.liquidity_net,
            });
        }
        Ok(ticks)
    }

    pub fn get_incentive_records(env: Env, pool_id: u64) -> Vec<IncentiveRecord> {
        read_incentive_records(&env, pool_id)
    }

    pub fn get_authorized_uptimes(env: Env) -> Vec<u64> {
        read_authorized_uptimes(&env)
    }

    /// Spread rewards `collect_spread_rewards` would pay now
    pub fn get_claimable_spread_rewards(env: Env, position_id: u64) -> Result<Map<Address, i128>, PoolError> {
        let position = read_position(&env, position_id).ok_or(PoolError::PositionNotFound)?;
        let pool = load_pool(&env, position.pool_id)?;

        let (spread_inside, _) = growth_inside_range(&env, &pool, position.lower_tick, position.upper_tick)?;
        Ok(truncate_coins(&spread_reward_claim(&position, &spread_inside)?)?)
    }

    /// Incentives a position could collect now, and what it would forfeit
    pub fn get_claimable_incentives(env: Env, position_id: u64) -> Result<ClaimableIncentives, PoolError> {
        let position = read_position(&env, position_id).ok_or(PoolError::PositionNotFound)?;
        let mut pool = load_pool(&env, position.pool_id)?;

        let now = env.ledger().timestamp();
        advance_uptime(&env, &mut pool, now)?;
        let (_, uptime_inside) = growth_inside_range(&env, &pool, position.lower_tick, position.upper_tick)?;
        let settlement = incentive_settlement(&position, &uptime_inside, now)?;

        let mut forfeited = empty_coins(&env);
        for tier in settlement.forfeited.iter() {
            forfeited = forfeited.accum_add(&tier)?;
        }

        Ok(ClaimableIncentives {
            claimable: truncate_coins(&settlement.claimable)?,
            forfeited: truncate_coins(&forfeited)?,
        })
    }
}

// ========================================================
// LOADING AND VALIDATION
// ========================================================

fn load_config(env: &Env) -> Result<EngineConfig, PoolError> {
    if !is_initialized(env) {
        return Err(PoolError::NotInitialized);
    }
    Ok(read_config(env))
}

fn load_pool(env: &Env, pool_id: u64) -> Result<PoolState, PoolError> {
    read_pool(env, pool_id).ok_or(PoolError::PoolNotFound)
}

fn load_owned_position(env: &Env, owner: &Address, position_id: u64) -> Result<Position, PoolError> {
    let position = read_position(env, position_id).ok_or(PoolError::PositionNotFound)?;
    if position.owner != *owner {
        return Err(PoolError::NotPositionOwner);
    }
    Ok(position)
}

fn validate_amounts(
    amount0_desired: i128,
    amount1_desired: i128,
    amount0_min: i128,
    amount1_min: i128,
) -> Result<(), PoolError> {
    if amount0_desired < 0 || amount1_desired < 0 || amount0_min < 0 || amount1_min < 0 {
        return Err(PoolError::InvalidAmount);
    }
    if amount0_desired == 0 && amount1_desired == 0 {
        return Err(PoolError::InvalidAmount);
    }
    Ok(())
}

fn longest_authorized_uptime(env: &Env) -> u64 {
    read_authorized_uptimes(env).iter().max().unwrap_or(0)
}

// ========================================================
// LIQUIDITY
// ========================================================

/// Liquidity the desired amounts can back over the range at the pool price
fn liquidity_for(
    pool: &PoolState,
    lower_tick: i32,
    upper_tick: i32,
    amount0: i128,
    amount1: i128,
) -> Result<Dec, PoolError> {
    let liquidity = liquidity_from_amounts(
        &pool.sqrt_price,
        &tick_to_sqrt_price(lower_tick)?,
        &tick_to_sqrt_price(upper_tick)?,
        &Dec::from_int(amount0),
        &Dec::from_int(amount1),
    )?;
    if !liquidity.is_positive() {
        return Err(PoolError::ZeroLiquidity);
    }
    Ok(liquidity)
}

/// Apply a signed liquidity change to a range: both boundary ticks, the
/// tick index, and the pool's active liquidity.
///
/// Returns the token amounts moved, rounded up for deposits and down for
/// withdrawals.
fn modify_liquidity(
    env: &Env,
    pool: &mut PoolState,
    lower_tick: i32,
    upper_tick: i32,
    liquidity_delta: &Dec,
) -> Result<(i128, i128), PoolError> {
    let mut index = read_tick_index(env, pool.id);
    for (tick, is_upper) in [(lower_tick, false), (upper_tick, true)] {
        let update = update_tick_with_liquidity(
            env,
            read_tick(env, pool.id, tick),
            tick,
            pool.current_tick,
            liquidity_delta,
            is_upper,
            &pool.spread_reward_growth,
            &pool.uptime_growth,
        )?;
        apply_tick_update(env, pool.id, tick, &update, &mut index);
    }
    write_tick_index(env, pool.id, &index);

    if lower_tick <= pool.current_tick && pool.current_tick < upper_tick {
        pool.liquidity = pool.liquidity.checked_add(liquidity_delta)?;
        if pool.liquidity.is_negative() {
            return Err(PoolError::NegativeLiquidity);
        }
    }

    let (amount0, amount1) = amounts_for_liquidity(
        &pool.sqrt_price,
        pool.current_tick,
        lower_tick,
        upper_tick,
        liquidity_delta,
    )?;
    if liquidity_delta.is_positive() {
        Ok((amount0.ceil_int()?, amount1.ceil_int()?))
    } else {
        Ok((amount0.truncate_int()?, amount1.truncate_int()?))
    }
}

fn growth_inside_range(
    env: &Env,
    pool: &PoolState,
    lower_tick: i32,
    upper_tick: i32,
) -> Result<(DecCoins, UptimeGrowth), PoolError> {
    let lower = read_tick(env, pool.id, lower_tick).ok_or(PoolError::TickNotFound)?;
    let upper = read_tick(env, pool.id, upper_tick).ok_or(PoolError::TickNotFound)?;

    let spread = spread_reward_growth_inside(
        pool.current_tick,
        lower_tick,
        &lower,
        upper_tick,
        &upper,
        &pool.spread_reward_growth,
    )?;
    let uptime = uptime_growth_inside(
        pool.current_tick,
        lower_tick,
        &lower,
        upper_tick,
        &upper,
        &pool.uptime_growth,
    )?;
    Ok((spread, uptime))
}

// ========================================================
// UPTIME SYNC
// ========================================================

/// Advance `pool`'s uptime growth to `now` in memory.
fn advance_uptime(env: &Env, pool: &mut PoolState, now: u64) -> Result<Option<UptimeSync>, PoolError> {
    if now <= pool.last_liquidity_update {
        return Ok(None);
    }

    let records = read_incentive_records(env, pool.id);
    let sync = sync_uptime_accumulators(
        env,
        &pool.uptime_growth,
        &records,
        &pool.liquidity,
        pool.last_liquidity_update,
        now,
    )?;
    pool.uptime_growth = sync.uptime_growth.clone();
    pool.last_liquidity_update = now;
    Ok(Some(sync))
}

/// Advance `pool`'s uptime growth to `now` and persist the records.
/// The caller writes the pool.
fn sync_pool(env: &Env, pool: &mut PoolState, now: u64) -> Result<(), PoolError> {
    if let Some(sync) = advance_uptime(env, pool, now)? {
        if !sync.records.is_empty() || !sync.exhausted.is_empty() {
            write_incentive_records(env, pool.id, &sync.records);
        }
        for incentive_id in sync.truncated.iter() {
            emit_uptime_truncated(env, pool.id, incentive_id);
        }
        for incentive_id in sync.overflowed.iter() {
            emit_uptime_overflowed(env, pool.id, incentive_id);
        }
        for incentive_id in sync.exhausted.iter() {
            emit_incentive_exhausted(env, pool.id, incentive_id);
        }
    }
    Ok(())
}

// ========================================================
// SETTLEMENT
// ========================================================

/// Settle everything a position has earned and advance its snapshots.
///
/// Unpaid fractions are carried in the snapshots for `liquidity_after`,
/// the liquidity the position holds once the caller is done with it.
/// Returns (spread rewards, incentives) to pay out.
fn settle_position(
    env: &Env,
    pool: &mut PoolState,
    position: &mut Position,
    now: u64,
    liquidity_after: &Dec,
) -> Result<(Map<Address, i128>, Map<Address, i128>), PoolError> {
    let (spread_inside, uptime_inside) =
        growth_inside_range(env, pool, position.lower_tick, position.upper_tick)?;

    let claim = spread_reward_claim(position, &spread_inside)?;
    let spread = truncate_coins(&claim)?;
    position.spread_reward_snapshot = carry_remainder(&spread_inside, &claim, liquidity_after)?;

    let incentives = settle_incentives(env, pool, position, &uptime_inside, now, liquidity_after)?;
    Ok((spread, incentives))
}

/// Settle incentives, redistributing what the position forfeits.
///
/// Forfeited amounts go to the pool's other active liquidity. The position
/// is excluded by bumping its own snapshot by the same increment.
fn settle_incentives(
    env: &Env,
    pool: &mut PoolState,
    position: &mut Position,
    uptime_inside: &UptimeGrowth,
    now: u64,
    liquidity_after: &Dec,
) -> Result<Map<Address, i128>, PoolError> {
    let settlement = incentive_settlement(position, uptime_inside, now)?;
    let mut owed = settlement.claimable;
    let mut snapshots = uptime_inside.clone();

    if settlement.forfeited.iter().any(|tier| !tier.is_empty()) {
        let active = is_active(position, pool.current_tick);
        let other_liquidity = if active {
            pool.liquidity.checked_sub_non_negative(&position.liquidity)?
        } else {
            pool.liquidity
        };

        let redeposit = redeposit_forfeited(&pool.uptime_growth, &settlement.forfeited, &other_liquidity)?;
        pool.uptime_growth = redeposit.uptime_growth;
        if active {
            snapshots = snapshots.accum_add(&redeposit.increments)?;
        }

        let refunded = !redeposit.refund.is_empty();
        owed = owed.accum_add(&redeposit.refund)?;
        emit_incentives_forfeited(env, position.id, refunded);
    }

    position.uptime_snapshots = carry_uptime_remainder(&snapshots, &owed, liquidity_after)?;
    Ok(truncate_coins(&owed)?)
}

// ========================================================
// SWAP HELPERS
// ========================================================

/// Resolve direction, sync, and run the swap loop over stored ticks.
///
/// With `persist` false the uptime sync is only applied in memory, for
/// quotes.
fn run_swap(
    env: &Env,
    pool_id: u64,
    token: &Address,
    amount: i128,
    exact_in: bool,
    price_limit: Option<Dec>,
    persist: bool,
) -> Result<(PoolState, SwapOutcome, bool), PoolError> {
    let mut pool = load_pool(env, pool_id)?;
    let is_token0 = pool.is_token0(token).ok_or(PoolError::InvalidToken)?;
    let zero_for_one = if exact_in { is_token0 } else { !is_token0 };

    if amount <= 0 {
        return Err(PoolError::ZeroSwapAmount);
    }
    if !pool.has_price() {
        return Err(PoolError::NoLiquidity);
    }

    let now = env.ledger().timestamp();
    if persist {
        sync_pool(env, &mut pool, now)?;
    } else {
        advance_uptime(env, &mut pool, now)?;
    }

    let token_in = if zero_for_one {
        pool.token0.clone()
    } else {
        pool.token1.clone()
    };
    let sqrt_price_limit = resolve_sqrt_price_limit(&pool.sqrt_price, price_limit, zero_for_one)?;

    let state = SwapState {
        sqrt_price: pool.sqrt_price,
        current_tick: pool.current_tick,
        liquidity: pool.liquidity,
        spread_reward_growth: pool.spread_reward_growth.clone(),
        uptime_growth: pool.uptime_growth.clone(),
    };
    let params = SwapParams {
        token_in,
        zero_for_one,
        exact_in,
        amount_specified: Dec::from_int(amount),
        sqrt_price_limit,
        spread_factor: pool.spread_factor,
    };

    let outcome = compute_swap(env, &StoredTicks::load(env, pool_id), &state, &params)?;
    Ok((pool, outcome, zero_for_one))
}

/// Write the swap's crossed ticks and pool state, then settle tokens.
fn commit_swap(
    env: &Env,
    pool: &mut PoolState,
    outcome: &SwapOutcome,
    sender: &Address,
    zero_for_one: bool,
) -> Result<SwapResult, PoolError> {
    for crossed in outcome.crossed.iter() {
        write_tick(env, pool.id, crossed.tick, &crossed.info);
    }

    pool.sqrt_price = outcome.state.sqrt_price;
    pool.current_tick = outcome.state.current_tick;
    pool.liquidity = outcome.state.liquidity;
    pool.spread_reward_growth = outcome.state.spread_reward_growth.clone();
    pool.uptime_growth = outcome.state.uptime_growth.clone();
    write_pool(env, pool);

    if outcome.spread_truncations > 0 {
        emit_spread_truncated(env, pool.id, outcome.spread_truncations);
    }

    let (token_in, token_out) = if zero_for_one {
        (&pool.token0, &pool.token1)
    } else {
        (&pool.token1, &pool.token0)
    };
    transfer_in(env, token_in, sender, outcome.amount_in);
    transfer_out(env, token_out, sender, outcome.amount_out);

    emit_swap(
        env,
        pool.id,
        sender,
        token_in,
        outcome.amount_in,
        outcome.amount_out,
        &outcome.spread_charge,
        pool.current_tick,
    );
    Ok(outcome.to_result())
}

// ========================================================
// TOKEN TRANSFERS
// ========================================================

fn transfer_in(env: &Env, token: &Address, from: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(env, token).transfer(from, &env.current_contract_address(), &amount);
    }
}

fn transfer_out(env: &Env, token: &Address, to: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
    }
}

fn pay_out_spread(env: &Env, position_id: u64, owner: &Address, amounts: &Map<Address, i128>) {
    if amounts.is_empty() {
        return;
    }
    for (token, amount) in amounts.iter() {
        transfer_out(env, &token, owner, amount);
    }
    emit_spread_collected(env, position_id, amounts);
}

fn pay_out_incentives(env: &Env, position_id: u64, owner: &Address, amounts: &Map<Address, i128>) {
    if amounts.is_empty() {
        return;
    }
    for (token, amount) in amounts.iter() {
        transfer_out(env, &token, owner, amount);
    }
    emit_incentives_collected(env, position_id, amounts);
}
