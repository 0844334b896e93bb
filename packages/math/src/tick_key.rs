// SPDX-License-Identifier: MIT
// Tick Key Encoding
//
// Layout: [sign marker][i32 big-endian two's complement]. Negative ticks sit
// under 0x00 and run -1 => 0xFFFFFFFF, so lexicographic byte order matches
// numeric order across the whole range.

use soroban_sdk::{BytesN, Env};

use crate::constants::{TICK_KEY_LEN, TICK_KEY_NEGATIVE, TICK_KEY_NON_NEGATIVE};
use crate::error::MathError;

pub fn encode_tick(tick: i32) -> [u8; TICK_KEY_LEN] {
    let mut key = [0u8; TICK_KEY_LEN];
    key[0] = if tick < 0 { TICK_KEY_NEGATIVE } else { TICK_KEY_NON_NEGATIVE };
    key[1..].copy_from_slice(&tick.to_be_bytes());
    key
}

pub fn decode_tick(key: &[u8]) -> Result<i32, MathError> {
    if key.len() != TICK_KEY_LEN {
        return Err(MathError::InvalidTickKey);
    }

    let mut body = [0u8; 4];
    body.copy_from_slice(&key[1..]);
    let tick = i32::from_be_bytes(body);

    let expected = if tick < 0 { TICK_KEY_NEGATIVE } else { TICK_KEY_NON_NEGATIVE };
    if key[0] != expected {
        return Err(MathError::InvalidTickKey);
    }
    Ok(tick)
}

pub fn tick_key(env: &Env, tick: i32) -> BytesN<5> {
    BytesN::from_array(env, &encode_tick(tick))
}

pub fn tick_from_key(key: &BytesN<5>) -> Result<i32, MathError> {
    decode_tick(&key.to_array())
}
