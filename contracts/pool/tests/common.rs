#![allow(dead_code)]

use soroban_sdk::{
    testutils::Address as _, testutils::Events, testutils::Ledger, token, Address, Env, IntoVal,
    Symbol, Val, Vec,
};
use tidepool_math::Dec;
use tidepool_pool::{TidepoolPool, TidepoolPoolClient};

// Test constants
pub const POOL_ID: u64 = 1;
pub const TICK_SPACING: u32 = 1;
pub const START_TIME: u64 = 1_000_000;
pub const MINT_AMOUNT: i128 = 1_000_000_000_000_000;

pub struct Setup<'a> {
    pub client: TidepoolPoolClient<'a>,
    pub admin: Address,
    pub registry: Address,
    pub token0: Address,
    pub token1: Address,
}

pub fn dec(s: &str) -> Dec {
    Dec::from_decimal_str(s).unwrap()
}

/// Engine with one empty pool at spread factor 0
pub fn setup(env: &Env) -> Setup<'_> {
    setup_with_spread(env, Dec::zero())
}

/// Engine with one empty pool at the given spread factor
pub fn setup_with_spread(env: &Env, spread_factor: Dec) -> Setup<'_> {
    env.mock_all_auths();
    set_time(env, START_TIME);

    let admin = Address::generate(env);
    let registry = Address::generate(env);
    let token0 = create_token(env, &admin);
    let token1 = create_token(env, &admin);

    let engine = env.register(TidepoolPool, ());
    let client = TidepoolPoolClient::new(env, &engine);
    client.initialize(&admin, &registry);
    client.create_pool(&POOL_ID, &token0, &token1, &TICK_SPACING, &spread_factor);

    Setup {
        client,
        admin,
        registry,
        token0,
        token1,
    }
}

/// Create a test token
pub fn create_token(env: &Env, admin: &Address) -> Address {
    env.register_stellar_asset_contract_v2(admin.clone()).address()
}

/// Mint tokens to an address
pub fn mint_tokens(env: &Env, token: &Address, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, token).mint(to, &amount);
}

pub fn balance(env: &Env, token: &Address, of: &Address) -> i128 {
    token::Client::new(env, token).balance(of)
}

/// A user holding plenty of both pool tokens
pub fn funded_user(env: &Env, s: &Setup) -> Address {
    let user = Address::generate(env);
    mint_tokens(env, &s.token0, &user, MINT_AMOUNT);
    mint_tokens(env, &s.token1, &user, MINT_AMOUNT);
    user
}

pub fn set_time(env: &Env, timestamp: u64) {
    env.ledger().with_mut(|li| li.timestamp = timestamp);
}

pub fn advance_time(env: &Env, seconds: u64) {
    let now = env.ledger().timestamp();
    set_time(env, now + seconds);
}

/// Open a position with no minimum amounts; returns its id
pub fn open_position(s: &Setup, owner: &Address, lower: i32, upper: i32, amount0: i128, amount1: i128) -> u64 {
    s.client
        .create_position(owner, &POOL_ID, &lower, &upper, &amount0, &amount1, &0, &0)
        .position_id
}

/// Number of recorded events named `name`. Compare counts taken around a
/// call, since the host may or may not clear events between invocations.
pub fn event_count(env: &Env, name: &str) -> u32 {
    let topics: Vec<Val> = (Symbol::new(env, name),).into_val(env);
    env.events()
        .all()
        .iter()
        .filter(|(_, event_topics, _)| *event_topics == topics)
        .count() as u32
}
