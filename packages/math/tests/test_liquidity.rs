use tidepool_math::*;

fn dec(s: &str) -> Dec {
    Dec::from_decimal_str(s).unwrap()
}

// ============================================================
// LIQUIDITY FROM AMOUNTS
// ============================================================

#[test]
fn test_liquidity_from_amounts_in_range() {
    let current = dec("70.710678");
    let lower = dec("67.082039");
    let upper = dec("74.161984");

    let liquidity = liquidity_from_amounts(&current, &lower, &upper, &dec("1"), &dec("5000")).unwrap();
    assert_eq!(liquidity, dec("1377.927096082029653542"));

    let l0 = liquidity0(&dec("1"), &current, &upper).unwrap();
    let l1 = liquidity1(&dec("5000"), &current, &lower).unwrap();
    assert_eq!(l0, dec("1519.437618821730672388"));
    assert_eq!(l1, dec("1377.927096082029653542"));
    assert_eq!(core::cmp::min(l0, l1), liquidity);
}

#[test]
fn test_liquidity_from_amounts_outside_range() {
    let lower = dec("67.082039");
    let upper = dec("74.161984");

    // Below the range only token0 counts
    let below = liquidity_from_amounts(&dec("60"), &lower, &upper, &dec("1"), &dec("5000")).unwrap();
    assert_eq!(below, dec("702.680190736704310556"));

    // Above the range only token1 counts
    let above = liquidity_from_amounts(&dec("80"), &lower, &upper, &dec("1"), &dec("5000")).unwrap();
    assert_eq!(above, dec("706.220175439215982610"));
}

#[test]
fn test_liquidity_order_independent() {
    let a = dec("67.082039");
    let b = dec("74.161984");
    assert_eq!(
        liquidity0(&dec("10"), &a, &b).unwrap(),
        liquidity0(&dec("10"), &b, &a).unwrap()
    );
    assert_eq!(
        liquidity1(&dec("10"), &a, &b).unwrap(),
        liquidity1(&dec("10"), &b, &a).unwrap()
    );
}

#[test]
fn test_liquidity_zero_width_range() {
    let a = dec("70");
    assert_eq!(liquidity0(&dec("1"), &a, &a), Err(MathError::DivisionByZero));
    assert_eq!(liquidity1(&dec("1"), &a, &a), Err(MathError::DivisionByZero));
}

// ============================================================
// AMOUNT DELTAS
// ============================================================

#[test]
fn test_amount_deltas_round_toward_pool() {
    let liquidity = dec("1377927219");
    let next = dec("70.468932817327539027");
    let current = dec("70.710678");

    let amount0_up = calc_amount0_delta(&liquidity, &next, &current, true).unwrap();
    let amount0_down = calc_amount0_delta(&liquidity, &next, &current, false).unwrap();
    assert_eq!(amount0_up.to_dec().unwrap(), dec("66849.999999999999897227"));
    assert!(amount0_up > amount0_down);

    let amount1 = calc_amount1_delta(&liquidity, &next, &current, false).unwrap();
    assert_eq!(amount1.to_dec().unwrap(), dec("333107267.266511136411924087"));
}

#[test]
fn test_amount_deltas_zero_liquidity() {
    let amount = calc_amount0_delta(&Dec::zero(), &dec("1"), &dec("2"), true).unwrap();
    assert!(amount.is_zero());
    let amount = calc_amount1_delta(&Dec::zero(), &dec("1"), &dec("2"), true).unwrap();
    assert!(amount.is_zero());
}

#[test]
fn test_amounts_for_liquidity_deposit_and_withdraw() {
    let lower_tick = 84222;
    let upper_tick = 86129;
    let current = tick_to_sqrt_price(85176).unwrap();
    let liquidity = dec("1000000");

    let (deposit0, deposit1) =
        amounts_for_liquidity(&current, 85176, lower_tick, upper_tick, &liquidity).unwrap();
    let (withdraw0, withdraw1) =
        amounts_for_liquidity(&current, 85176, lower_tick, upper_tick, &liquidity.neg()).unwrap();

    assert!(deposit0.is_positive() && deposit1.is_positive());
    assert!(withdraw0 <= deposit0);
    assert!(withdraw1 <= deposit1);
}

#[test]
fn test_amounts_for_liquidity_single_sided() {
    let liquidity = dec("1000");
    let current = tick_to_sqrt_price(0).unwrap();

    let (amount0, amount1) = amounts_for_liquidity(&current, 0, 100, 200, &liquidity).unwrap();
    assert!(amount0.is_positive());
    assert!(amount1.is_zero());

    let (amount0, amount1) = amounts_for_liquidity(&current, 0, -200, -100, &liquidity).unwrap();
    assert!(amount0.is_zero());
    assert!(amount1.is_positive());

    // Upper bound is exclusive
    let (amount0, amount1) = amounts_for_liquidity(&current, 0, -100, 0, &liquidity).unwrap();
    assert!(amount0.is_zero());
    assert!(amount1.is_positive());
}
