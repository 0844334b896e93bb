mod common;

use soroban_sdk::{testutils::Address as _, Address, Env};
use tidepool_factory::{FactoryError, TidepoolFactory, TidepoolFactoryClient};
use tidepool_math::Dec;

#[test]
fn test_initialize() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, engine, _) = common::setup_factory(&env);

    assert_eq!(client.get_engine(), engine.address);
    assert_eq!(client.get_pool_count(), 0);
}

#[test]
fn test_initialize_twice_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, engine, admin) = common::setup_factory(&env);

    let result = client.try_initialize(&admin, &engine.address);
    assert_eq!(result, Err(Ok(FactoryError::AlreadyInitialized)));
}

#[test]
fn test_uninitialized_registry() {
    let env = Env::default();
    env.mock_all_auths();

    let client = TidepoolFactoryClient::new(&env, &env.register(TidepoolFactory, ()));
    let token_a = common::create_token(&env);
    let token_b = common::create_token(&env);

    assert_eq!(client.try_get_engine(), Err(Ok(FactoryError::NotInitialized)));
    let result = client.try_create_pool(
        &Address::generate(&env),
        &common::default_pool_params(&token_a, &token_b),
    );
    assert_eq!(result, Err(Ok(FactoryError::NotInitialized)));
    assert_eq!(
        client.try_set_tick_spacing_authorized(&5, &true),
        Err(Ok(FactoryError::NotInitialized))
    );
}

#[test]
fn test_default_parameters() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, _) = common::setup_factory(&env);

    for spacing in [1u32, 10, 100, 1000] {
        assert!(client.is_tick_spacing_authorized(&spacing));
    }
    assert!(!client.is_tick_spacing_authorized(&60));

    for factor in ["0.0001", "0.0005", "0.001", "0.002", "0.003", "0.005"] {
        assert!(client.is_spread_factor_authorized(&common::dec(factor)));
    }
    assert!(client.is_spread_factor_authorized(&Dec::zero()));
    assert!(!client.is_spread_factor_authorized(&common::dec("0.01")));
}
