// ============================================================
// REGISTRY VALIDATION FUZZING
// ============================================================

mod common;

use proptest::prelude::*;
use soroban_sdk::{testutils::Address as _, Address, Env};
use tidepool_factory::FactoryError;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn fuzz_only_authorized_tick_spacings_accepted(spacing in 1u32..2_000) {
        let env = Env::default();
        env.mock_all_auths();

        let (client, _, _) = common::setup_factory(&env);
        let token_a = common::create_token(&env);
        let token_b = common::create_token(&env);
        let mut params = common::default_pool_params(&token_a, &token_b);
        params.tick_spacing = spacing;

        let result = client.try_create_pool(&Address::generate(&env), &params);
        if [1, 10, 100, 1000].contains(&spacing) {
            prop_assert!(result.is_ok());
            prop_assert_eq!(client.get_pool_count(), 1);
        } else {
            prop_assert_eq!(result, Err(Ok(FactoryError::UnauthorizedTickSpacing)));
        }
    }

    #[test]
    fn fuzz_spread_factor_bounds(bps in 0u128..20_000) {
        let env = Env::default();
        env.mock_all_auths();

        let (client, _, _) = common::setup_factory(&env);
        let factor = common::dec("0.0001").mul_int(bps).unwrap();

        let result = client.try_set_spread_factor_authorized(&factor, &true);
        if bps < 10_000 {
            prop_assert!(result.is_ok());
            prop_assert!(client.is_spread_factor_authorized(&factor));
        } else {
            prop_assert_eq!(result, Err(Ok(FactoryError::InvalidSpreadFactor)));
        }
    }
}
