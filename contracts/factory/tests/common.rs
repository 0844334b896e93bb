#![allow(dead_code)]

use soroban_sdk::{testutils::Address as _, token::StellarAssetClient, Address, Env};
use tidepool_factory::{CreatePoolParams, TidepoolFactory, TidepoolFactoryClient};
use tidepool_math::Dec;
use tidepool_pool::{TidepoolPool, TidepoolPoolClient};

pub const MINT_AMOUNT: i128 = 1_000_000_000_000_000;

/// Registry wired to a fresh engine
pub fn setup_factory(env: &Env) -> (TidepoolFactoryClient<'_>, TidepoolPoolClient<'_>, Address) {
    let admin = Address::generate(env);

    let engine_id = env.register(TidepoolPool, ());
    let factory_id = env.register(TidepoolFactory, ());
    let engine = TidepoolPoolClient::new(env, &engine_id);
    let client = TidepoolFactoryClient::new(env, &factory_id);

    engine.initialize(&admin, &factory_id);
    client.initialize(&admin, &engine_id);
    (client, engine, admin)
}

pub fn create_token(env: &Env) -> Address {
    let admin = Address::generate(env);
    env.register_stellar_asset_contract_v2(admin).address()
}

pub fn mint_tokens(env: &Env, token: &Address, to: &Address, amount: i128) {
    StellarAssetClient::new(env, token).mint(to, &amount);
}

pub fn dec(s: &str) -> Dec {
    Dec::from_decimal_str(s).unwrap()
}

pub fn default_pool_params(token_a: &Address, token_b: &Address) -> CreatePoolParams {
    CreatePoolParams {
        token_a: token_a.clone(),
        token_b: token_b.clone(),
        tick_spacing: 10,
        spread_factor: dec("0.003"),
        token_a_as_token0: false,
    }
}
