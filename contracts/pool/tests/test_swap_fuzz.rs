// ============================================================
// SWAP FUZZING
// Quotes and executed swaps over random sizes and directions
// ============================================================

mod common;

use common::*;
use proptest::prelude::*;
use soroban_sdk::Env;

const AMOUNT: i128 = 1_000_000_000;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn fuzz_swap_matches_quote_and_never_gains(
        amount in 1_000i128..100_000_000,
        sell_token0 in any::<bool>(),
    ) {
        let env = Env::default();
        let s = setup_with_spread(&env, dec("0.003"));
        let lp = funded_user(&env, &s);
        let trader = funded_user(&env, &s);
        open_position(&s, &lp, -1000, 1000, AMOUNT, AMOUNT);

        let token_in = if sell_token0 { s.token0.clone() } else { s.token1.clone() };
        let quote = s.client.calc_out_amt_given_in(&POOL_ID, &token_in, &amount, &None);
        let result = s.client.swap_exact_amount_in(&trader, &POOL_ID, &token_in, &amount, &0, &None);

        prop_assert_eq!(&quote, &result);
        prop_assert_eq!(result.amount_in, amount);
        // Price starts at 1 and only moves against the trader
        prop_assert!(result.amount_out < amount);
        prop_assert!(result.spread_charge.is_positive());
    }

    #[test]
    fn fuzz_exact_out_delivers_requested_amount(
        amount in 1_000i128..100_000_000,
        buy_token0 in any::<bool>(),
    ) {
        let env = Env::default();
        let s = setup_with_spread(&env, dec("0.003"));
        let lp = funded_user(&env, &s);
        let trader = funded_user(&env, &s);
        open_position(&s, &lp, -1000, 1000, AMOUNT, AMOUNT);

        let token_out = if buy_token0 { s.token0.clone() } else { s.token1.clone() };
        let before = balance(&env, &token_out, &trader);
        let result = s.client.swap_exact_amount_out(&trader, &POOL_ID, &token_out, &amount, &i128::MAX, &None);

        prop_assert_eq!(result.amount_out, amount);
        prop_assert!(result.amount_in > amount);
        prop_assert_eq!(balance(&env, &token_out, &trader), before + amount);
    }
}
