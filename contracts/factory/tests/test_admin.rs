mod common;

use soroban_sdk::{testutils::Address as _, Address, Env};
use tidepool_factory::FactoryError;
use tidepool_math::Dec;

#[test]
fn test_authorize_tick_spacing() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, _) = common::setup_factory(&env);

    client.set_tick_spacing_authorized(&60, &true);
    assert!(client.is_tick_spacing_authorized(&60));

    client.set_tick_spacing_authorized(&10, &false);
    assert!(!client.is_tick_spacing_authorized(&10));
}

#[test]
fn test_zero_tick_spacing_rejected() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, _) = common::setup_factory(&env);

    let result = client.try_set_tick_spacing_authorized(&0, &true);
    assert_eq!(result, Err(Ok(FactoryError::InvalidTickSpacing)));
}

#[test]
fn test_authorize_spread_factor() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, _) = common::setup_factory(&env);
    let factor = common::dec("0.01");

    client.set_spread_factor_authorized(&factor, &true);
    assert!(client.is_spread_factor_authorized(&factor));

    client.set_spread_factor_authorized(&factor, &false);
    assert!(!client.is_spread_factor_authorized(&factor));
}

#[test]
fn test_spread_factor_out_of_range_rejected() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, _) = common::setup_factory(&env);

    let result = client.try_set_spread_factor_authorized(&Dec::one(), &true);
    assert_eq!(result, Err(Ok(FactoryError::InvalidSpreadFactor)));

    let result = client.try_set_spread_factor_authorized(&common::dec("-0.001"), &true);
    assert_eq!(result, Err(Ok(FactoryError::InvalidSpreadFactor)));
}

#[test]
#[should_panic]
fn test_parameter_update_requires_admin() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _, _) = common::setup_factory(&env);

    // Drop the mocked auths: the admin never signed this call
    env.set_auths(&[]);
    client.set_tick_spacing_authorized(&60, &true);
}

#[test]
fn test_set_admin() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, _) = common::setup_factory(&env);
    let new_admin = Address::generate(&env);

    client.set_admin(&new_admin);
    client.set_tick_spacing_authorized(&60, &true);
    assert!(client.is_tick_spacing_authorized(&60));
}
