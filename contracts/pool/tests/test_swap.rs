mod common;

use common::*;
use soroban_sdk::{testutils::Address as _, Address, Env};
use tidepool_math::Dec;
use tidepool_pool::PoolError;

const AMOUNT: i128 = 1_000_000_000;

/// Pool at price 1 with one position over [-1000, 1000)
fn liquid_pool(env: &Env) -> (Setup<'_>, Address, u64) {
    let s = setup(env);
    let lp = funded_user(env, &s);
    let id = open_position(&s, &lp, -1000, 1000, AMOUNT, AMOUNT);
    let trader = funded_user(env, &s);
    (s, trader, id)
}

// ============================================================
// EXACT IN
// ============================================================

#[test]
fn test_swap_exact_in_zero_for_one() {
    let env = Env::default();
    let (s, trader, _) = liquid_pool(&env);

    let result = s
        .client
        .swap_exact_amount_in(&trader, &POOL_ID, &s.token0, &1_000_000, &0, &None);

    assert_eq!(result.amount_in, 1_000_000);
    assert!(result.amount_out > 999_000 && result.amount_out < 1_000_000);
    assert_eq!(result.ticks_crossed, 0);
    assert_eq!(balance(&env, &s.token0, &trader), MINT_AMOUNT - 1_000_000);
    assert_eq!(balance(&env, &s.token1, &trader), MINT_AMOUNT + result.amount_out);

    let pool = s.client.get_pool(&POOL_ID);
    assert!(pool.sqrt_price < Dec::one());
    assert_eq!(pool.sqrt_price, result.sqrt_price);
    assert_eq!(pool.current_tick, -1);
}

#[test]
fn test_swap_exact_in_one_for_zero() {
    let env = Env::default();
    let (s, trader, _) = liquid_pool(&env);

    let result = s
        .client
        .swap_exact_amount_in(&trader, &POOL_ID, &s.token1, &1_000_000, &0, &None);

    assert!(result.amount_out > 999_000 && result.amount_out < 1_000_000);
    let pool = s.client.get_pool(&POOL_ID);
    assert!(pool.sqrt_price > Dec::one());
    assert_eq!(pool.current_tick, 0);
}

#[test]
fn test_quote_matches_swap_and_writes_nothing() {
    let env = Env::default();
    let (s, trader, _) = liquid_pool(&env);
    let pool_before = s.client.get_pool(&POOL_ID);

    let quote = s
        .client
        .calc_out_amt_given_in(&POOL_ID, &s.token0, &5_000_000, &None);
    assert_eq!(s.client.get_pool(&POOL_ID), pool_before);

    let result = s
        .client
        .swap_exact_amount_in(&trader, &POOL_ID, &s.token0, &5_000_000, &0, &None);
    assert_eq!(quote, result);
}

#[test]
fn test_swap_stops_at_price_limit() {
    let env = Env::default();
    let (s, trader, _) = liquid_pool(&env);
    let limit = dec("0.99");

    let result = s
        .client
        .swap_exact_amount_in(&trader, &POOL_ID, &s.token0, &AMOUNT, &0, &Some(limit));

    assert_eq!(result.sqrt_price, limit.sqrt().unwrap());
    assert!(result.amount_in < AMOUNT);
    assert_eq!(balance(&env, &s.token0, &trader), MINT_AMOUNT - result.amount_in);
}

// ============================================================
// EXACT OUT
// ============================================================

#[test]
fn test_swap_exact_out() {
    let env = Env::default();
    let (s, trader, _) = liquid_pool(&env);

    let quote = s
        .client
        .calc_in_amt_given_out(&POOL_ID, &s.token1, &1_000_000, &None);
    let result = s
        .client
        .swap_exact_amount_out(&trader, &POOL_ID, &s.token1, &1_000_000, &i128::MAX, &None);

    assert_eq!(quote, result);
    assert_eq!(result.amount_out, 1_000_000);
    assert!(result.amount_in > 1_000_000 && result.amount_in < 1_001_000);
    assert_eq!(balance(&env, &s.token1, &trader), MINT_AMOUNT + 1_000_000);
    assert_eq!(balance(&env, &s.token0, &trader), MINT_AMOUNT - result.amount_in);
}

#[test]
fn test_swap_exact_out_beyond_liquidity() {
    let env = Env::default();
    let (s, trader, _) = liquid_pool(&env);

    let result = s
        .client
        .try_swap_exact_amount_out(&trader, &POOL_ID, &s.token1, &(2 * AMOUNT), &i128::MAX, &None);
    assert_eq!(result, Err(Ok(PoolError::InsufficientLiquidity)));
}

// ============================================================
// SLIPPAGE AND VALIDATION
// ============================================================

#[test]
fn test_swap_slippage() {
    let env = Env::default();
    let (s, trader, _) = liquid_pool(&env);

    let result = s
        .client
        .try_swap_exact_amount_in(&trader, &POOL_ID, &s.token0, &1_000_000, &1_000_000, &None);
    assert_eq!(result, Err(Ok(PoolError::SlippageExceeded)));

    let result = s
        .client
        .try_swap_exact_amount_out(&trader, &POOL_ID, &s.token1, &1_000_000, &1_000_000, &None);
    assert_eq!(result, Err(Ok(PoolError::SlippageExceeded)));
}

#[test]
fn test_swap_validation() {
    let env = Env::default();
    let (s, trader, _) = liquid_pool(&env);
    let stranger = create_token(&env, &Address::generate(&env));

    let result = s
        .client
        .try_swap_exact_amount_in(&trader, &POOL_ID, &stranger, &1_000, &0, &None);
    assert_eq!(result, Err(Ok(PoolError::InvalidToken)));

    let result = s
        .client
        .try_swap_exact_amount_in(&trader, &POOL_ID, &s.token0, &0, &0, &None);
    assert_eq!(result, Err(Ok(PoolError::ZeroSwapAmount)));

    // Selling token0 pushes the price down, so a limit above it is invalid
    let result = s
        .client
        .try_swap_exact_amount_in(&trader, &POOL_ID, &s.token0, &1_000, &0, &Some(dec("2")));
    assert_eq!(result, Err(Ok(PoolError::InvalidPriceLimit)));
}

#[test]
fn test_swap_without_price() {
    let env = Env::default();
    let s = setup(&env);
    let trader = funded_user(&env, &s);

    let result = s
        .client
        .try_swap_exact_amount_in(&trader, &POOL_ID, &s.token0, &1_000, &0, &None);
    assert_eq!(result, Err(Ok(PoolError::NoLiquidity)));

    let result = s.client.try_calc_out_amt_given_in(&POOL_ID, &s.token0, &1_000, &None);
    assert_eq!(result, Err(Ok(PoolError::NoLiquidity)));
}

// ============================================================
// TICK CROSSING
// ============================================================

#[test]
fn test_swap_crosses_into_adjacent_range_and_back() {
    let env = Env::default();
    let (s, trader, _) = liquid_pool(&env);
    let lp = funded_user(&env, &s);
    let upper_range_liquidity = s.client.get_pool(&POOL_ID).liquidity;
    let below = s
        .client
        .create_position(&lp, &POOL_ID, &-2000, &-1000, &0, &AMOUNT, &0, &0);

    let down = s
        .client
        .swap_exact_amount_in(&trader, &POOL_ID, &s.token0, &(2 * AMOUNT), &0, &None);

    assert_eq!(down.ticks_crossed, 1);
    assert!(down.current_tick > -2000 && down.current_tick < -1000);
    assert!(down.amount_out > AMOUNT && down.amount_out < 2 * AMOUNT);
    let pool = s.client.get_pool(&POOL_ID);
    assert_eq!(pool.liquidity, below.liquidity_delta);
    assert_eq!(pool.current_tick, down.current_tick);

    let up = s
        .client
        .swap_exact_amount_in(&trader, &POOL_ID, &s.token1, &AMOUNT, &0, &None);

    assert_eq!(up.ticks_crossed, 1);
    assert!(up.current_tick >= -1000 && up.current_tick < 1000);
    assert_eq!(s.client.get_pool(&POOL_ID).liquidity, upper_range_liquidity);
}

// ============================================================
// SPREAD REWARD ACCRUAL
// ============================================================

#[test]
fn test_spread_reward_truncated_to_zero_is_skipped() {
    let env = Env::default();
    let s = setup_with_spread(&env, dec("0.000000000000000001"));
    let lp = funded_user(&env, &s);
    let trader = funded_user(&env, &s);
    open_position(&s, &lp, -1000, 1000, AMOUNT, AMOUNT);

    // A spread of about 1e-17 over ~2e10 liquidity rounds to zero per unit
    let before = event_count(&env, "spread_trunc");
    let result = s
        .client
        .swap_exact_amount_out(&trader, &POOL_ID, &s.token1, &10, &100, &None);

    assert!(result.spread_charge.is_positive());
    assert_eq!(event_count(&env, "spread_trunc"), before + 1);
    assert!(s.client.get_pool(&POOL_ID).spread_reward_growth.is_empty());

    // A charge large enough to divide accrues normally
    s.client.create_pool(&2, &s.token0, &s.token1, &TICK_SPACING, &dec("0.01"));
    s.client
        .create_position(&lp, &2, &-1000, &1000, &AMOUNT, &AMOUNT, &0, &0);
    let before = event_count(&env, "spread_trunc");
    s.client
        .swap_exact_amount_out(&trader, &2, &s.token1, &1_000_000, &2_000_000, &None);

    assert_eq!(event_count(&env, "spread_trunc"), before);
    let growth = s.client.get_pool(&2).spread_reward_growth;
    assert!(growth.get(s.token0.clone()).unwrap().is_positive());
}

#[test]
fn test_spread_rewards_accrue_only_to_active_range() {
    let env = Env::default();
    let s = setup_with_spread(&env, dec("0.01"));
    let lp = funded_user(&env, &s);
    let trader = funded_user(&env, &s);
    let upper = open_position(&s, &lp, -1000, 1000, AMOUNT, AMOUNT);
    let lower = open_position(&s, &lp, -2000, -1000, 0, AMOUNT);

    // Nothing accrues to the lower range before the price reaches it
    s.client
        .swap_exact_amount_in(&trader, &POOL_ID, &s.token0, &1_000_000, &0, &None);
    assert!(s.client.get_claimable_spread_rewards(&lower).is_empty());
    let upper_before = s.client.get_claimable_spread_rewards(&upper).get(s.token0.clone()).unwrap();
    assert!((9_990..=10_000).contains(&upper_before));

    let down = s
        .client
        .swap_exact_amount_in(&trader, &POOL_ID, &s.token0, &(2 * AMOUNT), &0, &None);
    assert_eq!(down.ticks_crossed, 1);

    // The crossing swap's spread is split between the two ranges
    let upper_after_cross = s.client.get_claimable_spread_rewards(&upper).get(s.token0.clone()).unwrap();
    let lower_after_cross = s.client.get_claimable_spread_rewards(&lower).get(s.token0.clone()).unwrap();
    assert!(upper_after_cross > upper_before);
    assert!(lower_after_cross > 0);
    let charged = down.spread_charge.truncate_int().unwrap();
    let paid = upper_after_cross - upper_before + lower_after_cross;
    // Each claim truncates on its own
    assert!((paid - charged).abs() <= 2);

    // Past the crossing only the lower range is active
    s.client
        .swap_exact_amount_in(&trader, &POOL_ID, &s.token0, &1_000_000, &0, &None);
    assert_eq!(
        s.client.get_claimable_spread_rewards(&upper).get(s.token0.clone()).unwrap(),
        upper_after_cross
    );
    let lower_now = s.client.get_claimable_spread_rewards(&lower).get(s.token0.clone()).unwrap();
    assert!((9_990..=10_000).contains(&(lower_now - lower_after_cross)));
}
