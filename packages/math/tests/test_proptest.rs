// Property-Based Testing with Proptest
// Run with: cargo test -p tidepool-math --test test_proptest

use proptest::prelude::*;
use tidepool_math::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: sqrt price -> tick recovers the tick exactly
    #[test]
    fn prop_tick_roundtrip(tick in MIN_TICK..=MAX_TICK) {
        let sqrt = tick_to_sqrt_price(tick).unwrap();
        prop_assert_eq!(sqrt_price_to_tick(&sqrt).unwrap(), tick);
        prop_assert_eq!(tick_to_sqrt_price(sqrt_price_to_tick(&sqrt).unwrap()).unwrap(), sqrt);
    }

    /// Property: price -> tick is the exact floor inverse
    #[test]
    fn prop_price_to_tick_floor(tick in MIN_TICK..MAX_TICK) {
        let price = tick_to_price(tick).unwrap();
        prop_assert_eq!(price_to_tick(&price).unwrap(), tick);
        let next = tick_to_price(tick + 1).unwrap();
        prop_assert!(next > price);
    }

    /// Property: tick keys decode to the same tick
    #[test]
    fn prop_tick_key_roundtrip(tick in any::<i32>()) {
        prop_assert_eq!(decode_tick(&encode_tick(tick)).unwrap(), tick);
    }

    /// Property: byte order of tick keys matches numeric order
    #[test]
    fn prop_tick_key_ordering(a in any::<i32>(), b in any::<i32>()) {
        prop_assert_eq!(a.cmp(&b), encode_tick(a).cmp(&encode_tick(b)));
    }

    /// Property: liquidity grows with the deposited amount
    #[test]
    fn prop_liquidity_monotonic(
        lower in -100_000i32..0,
        width in 1i32..50_000,
        amount in 1i128..1_000_000_000_000,
        extra in 1i128..1_000_000,
    ) {
        let sqrt_a = tick_to_sqrt_price(lower).unwrap();
        let sqrt_b = tick_to_sqrt_price(lower + width).unwrap();
        let small = Dec::from_int(amount);
        let large = Dec::from_int(amount + extra);

        prop_assert!(liquidity0(&large, &sqrt_a, &sqrt_b).unwrap() >= liquidity0(&small, &sqrt_a, &sqrt_b).unwrap());
        prop_assert!(liquidity1(&large, &sqrt_a, &sqrt_b).unwrap() >= liquidity1(&small, &sqrt_a, &sqrt_b).unwrap());
    }

    /// Property: in-range liquidity never exceeds either one-sided liquidity
    #[test]
    fn prop_liquidity_min_bound(
        current in -10_000i32..10_000,
        below in 1i32..5_000,
        above in 1i32..5_000,
        amount0 in 1i128..1_000_000_000,
        amount1 in 1i128..1_000_000_000,
    ) {
        let cur = tick_to_sqrt_price(current).unwrap();
        let sqrt_a = tick_to_sqrt_price(current - below).unwrap();
        let sqrt_b = tick_to_sqrt_price(current + above).unwrap();
        let a0 = Dec::from_int(amount0);
        let a1 = Dec::from_int(amount1);

        let liquidity = liquidity_from_amounts(&cur, &sqrt_a, &sqrt_b, &a0, &a1).unwrap();
        prop_assert!(liquidity <= liquidity0(&a0, &cur, &sqrt_b).unwrap());
        prop_assert!(liquidity <= liquidity1(&a1, &cur, &sqrt_a).unwrap());
    }

    /// Property: amounts needed to deposit never fall below amounts returned on withdraw
    #[test]
    fn prop_deposit_covers_withdraw(
        current in -20_000i32..20_000,
        lower_offset in -5_000i32..5_000,
        width in 1i32..5_000,
        liquidity in 1i128..1_000_000_000_000,
    ) {
        let lower = current + lower_offset;
        let upper = lower + width;
        let sqrt = tick_to_sqrt_price(current).unwrap();
        let l = Dec::from_int(liquidity);

        let (d0, d1) = amounts_for_liquidity(&sqrt, current, lower, upper, &l).unwrap();
        let (w0, w1) = amounts_for_liquidity(&sqrt, current, lower, upper, &l.neg()).unwrap();
        prop_assert!(w0 <= d0);
        prop_assert!(w1 <= d1);
    }
}
