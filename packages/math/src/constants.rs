// SPDX-License-Identifier: MIT
//
// Constants for the price ladder and pool-wide limits, grouped by concern.

use primitive_types::U256;

// ============================================================
// TICK CONSTANTS
// ============================================================

/// Minimum valid tick value
/// Price at MIN_TICK ≈ 1.0000026e-12, the smallest price the ladder supports
pub const MIN_TICK: i32 = -276324;

/// Maximum valid tick value
/// Price at MAX_TICK ≈ 9.9999736e11, the largest price the ladder supports
pub const MAX_TICK: i32 = 276324;

/// Every tick multiplies price by 1 + 10^EXPONENT_AT_PRICE_ONE
pub const EXPONENT_AT_PRICE_ONE: i32 = -4;

/// Length in bytes of an encoded tick key
pub const TICK_KEY_LEN: usize = 5;

/// Sign marker for ticks below zero
pub const TICK_KEY_NEGATIVE: u8 = 0x00;

/// Sign marker for ticks at or above zero
pub const TICK_KEY_NON_NEGATIVE: u8 = 0x01;

// ============================================================
// SQRT PRICE LADDER (36 decimals)
// ============================================================

/// sqrt(1.0001)^(2^k) * 10^36 for k = 0..=18, rounded half-even.
///
/// Bit k of |tick| selects entry k. 2^18 > MAX_TICK, so 19 entries cover
/// the whole range.
pub const SQRT_RATIO_LADDER: [U256; 19] = [
    U256([0x99e592514cfbda29, 0x00c09a458e75bb33, 0, 0]),
    U256([0x38f88e9100000000, 0x00c09cbca9364871, 0, 0]),
    U256([0xfcca807310000000, 0x00c0a1aaf6f3582a, 0, 0]),
    U256([0x19dffd3e47100000, 0x00c0ab87f36031c7, 0, 0]),
    U256([0x42459099f254ef10, 0x00c0bf43701bf832, 0, 0]),
    U256([0x9f8083f4f18f2b11, 0x00c0e6c079d53824, 0, 0]),
    U256([0x5b72f4708c9e2c95, 0x00c135d2d41ad3e2, 0, 0]),
    U256([0xc0508b75a98c0609, 0x00c1d458d266ca13, 0, 0]),
    U256([0x7d5c44f4adc2e383, 0x00c312eb6ac221fb, 0, 0]),
    U256([0x2abc09178c735165, 0x00c59636c2802c8c, 0, 0]),
    U256([0x76dea7c0db9521bc, 0x00cab5c4f0285b30, 0, 0]),
    U256([0xe5c8efd207d87924, 0x00d55bc8d61da71f, 0, 0]),
    U256([0x33921c28679227fe, 0x00ec5cef8873828c, 0, 0]),
    U256([0x26e88711b5311268, 0x0122149efd502968, 0, 0]),
    U256([0x78941c9d1bee65c8, 0x01b4ea2f1cdb3130, 0, 0]),
    U256([0x2dab6e281e7260ae, 0x03df2e59345bb2a0, 0, 0]),
    U256([0x4cb1aaeb4f6ecc85, 0x13ed1e94bb82d8db, 0, 0]),
    U256([0xbe1e22bf080a20b4, 0x0fc6ef930b0572c4, 0x0000000000000002, 0]),
    U256([0x7b944c2e7f0535f1, 0x4ead554e45f68a95, 0x00000000000005a6, 0]),
];

// ============================================================
// SWAP CONSTANTS
// ============================================================

/// Upper bound on steps in one swap loop
pub const MAX_SWAP_ITERATIONS: u32 = 1024;
