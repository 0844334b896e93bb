use tidepool_math::*;

fn dec(s: &str) -> Dec {
    Dec::from_decimal_str(s).unwrap()
}

// ============================================================
// TICK TO SQRT PRICE TESTS
// ============================================================

#[test]
fn test_tick_to_sqrt_price_zero() {
    assert_eq!(tick_to_sqrt_price(0).unwrap(), Dec::one(), "Tick 0 should give sqrt price 1.0");
}

#[test]
fn test_tick_to_sqrt_price_known_values() {
    assert_eq!(tick_to_sqrt_price(1).unwrap(), dec("1.000049998750062496"));
    assert_eq!(tick_to_sqrt_price(-1).unwrap(), dec("0.999950003749687527"));
    assert_eq!(tick_to_sqrt_price(100).unwrap(), dec("1.005012269623051203"));
    assert_eq!(tick_to_sqrt_price(-100).unwrap(), dec("0.995012727929250903"));
    assert_eq!(tick_to_sqrt_price(10000).unwrap(), dec("1.648680055931175769"));
}

#[test]
fn test_tick_to_sqrt_price_bounds() {
    assert_eq!(min_sqrt_price().unwrap(), dec("0.000001000001321914"));
    assert_eq!(max_sqrt_price().unwrap(), dec("999998.678087145849760004"));
}

#[test]
fn test_tick_to_sqrt_price_out_of_range() {
    assert_eq!(tick_to_sqrt_price(MAX_TICK + 1), Err(MathError::TickOutOfBounds));
    assert_eq!(tick_to_sqrt_price(MIN_TICK - 1), Err(MathError::TickOutOfBounds));
    assert_eq!(tick_to_sqrt_price(i32::MIN), Err(MathError::TickOutOfBounds));
}

#[test]
fn test_tick_to_sqrt_price_monotonic_near_bounds() {
    let mut prev = tick_to_sqrt_price(MIN_TICK).unwrap();
    for tick in (MIN_TICK + 1)..(MIN_TICK + 200) {
        let next = tick_to_sqrt_price(tick).unwrap();
        assert!(next > prev, "sqrt price must increase at tick {}", tick);
        prev = next;
    }

    let mut prev = tick_to_sqrt_price(MAX_TICK - 200).unwrap();
    for tick in (MAX_TICK - 199)..=MAX_TICK {
        let next = tick_to_sqrt_price(tick).unwrap();
        assert!(next > prev, "sqrt price must increase at tick {}", tick);
        prev = next;
    }
}

// ============================================================
// PRICE TESTS
// ============================================================

#[test]
fn test_tick_to_price_known_values() {
    assert_eq!(tick_to_price(0).unwrap(), Dec::one());
    assert_eq!(tick_to_price(1).unwrap(), dec("1.000099999999999999"));
    assert_eq!(tick_to_price(-1).unwrap(), dec("0.999900009999000099"));
    assert_eq!(tick_to_price(6931).unwrap(), dec("1.999836340196927629"));
    assert_eq!(min_spot_price().unwrap(), dec("0.000000000001000002"));
}

#[test]
fn test_price_to_tick_floor() {
    assert_eq!(price_to_tick(&Dec::one()).unwrap(), 0);
    assert_eq!(price_to_tick(&dec("1.0001")).unwrap(), 1);
    assert_eq!(price_to_tick(&dec("2")).unwrap(), 6931);
    assert_eq!(price_to_tick(&dec("0.9999")).unwrap(), -2);
}

#[test]
fn test_price_to_tick_out_of_bounds() {
    assert_eq!(price_to_tick(&Dec::zero()), Err(MathError::PriceOutOfBounds));
    assert_eq!(
        price_to_tick(&dec("1000000000000")),
        Err(MathError::PriceOutOfBounds)
    );
}

// ============================================================
// SQRT PRICE TO TICK TESTS
// ============================================================

#[test]
fn test_sqrt_price_to_tick_exact() {
    for tick in [MIN_TICK, -100_000, -1, 0, 1, 4545, 100_000, MAX_TICK] {
        let sqrt = tick_to_sqrt_price(tick).unwrap();
        assert_eq!(sqrt_price_to_tick(&sqrt).unwrap(), tick);
    }
}

#[test]
fn test_sqrt_price_to_tick_between_ticks() {
    // 70.710678^2 = 4999.999983..., just under 5000
    let tick = sqrt_price_to_tick(&dec("70.710678")).unwrap();
    assert!(tick_to_sqrt_price(tick).unwrap() <= dec("70.710678"));
    assert!(tick_to_sqrt_price(tick + 1).unwrap() > dec("70.710678"));
    assert_eq!(tick, 85176);
}

#[test]
fn test_sqrt_price_to_tick_just_below_tick() {
    let sqrt = tick_to_sqrt_price(500).unwrap();
    let below = sqrt.checked_sub(&Dec::from_raw(false, 1u8.into())).unwrap();
    assert_eq!(sqrt_price_to_tick(&below).unwrap(), 499);
}

#[test]
fn test_sqrt_price_to_tick_out_of_bounds() {
    assert_eq!(sqrt_price_to_tick(&dec("0.000001")), Err(MathError::PriceOutOfBounds));
    assert_eq!(sqrt_price_to_tick(&dec("1000000")), Err(MathError::PriceOutOfBounds));
}

#[test]
fn test_tick_alignment() {
    assert!(is_tick_aligned(-200, 100));
    assert!(is_tick_aligned(0, 1));
    assert!(!is_tick_aligned(150, 100));
    assert!(!is_tick_aligned(10, 0));
}
