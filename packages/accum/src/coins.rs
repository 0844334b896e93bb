// SPDX-License-Identifier: MIT
// Per-token decimal amounts

use soroban_sdk::{Address, Env, Map, Vec};
use tidepool_math::{Dec, MathError};

use crate::error::AccumError;

/// Per-token decimal amounts. Zero entries are never stored.
pub type DecCoins = Map<Address, Dec>;

pub fn empty_coins(env: &Env) -> DecCoins {
    Map::new(env)
}

/// coins[token] += amount
pub fn add_coin(coins: &mut DecCoins, token: &Address, amount: &Dec) -> Result<(), MathError> {
    let current = coins.get(token.clone()).unwrap_or_default();
    let updated = current.checked_add(amount)?;
    if updated.is_zero() {
        coins.remove(token.clone());
    } else {
        coins.set(token.clone(), updated);
    }
    Ok(())
}

/// Every entry multiplied by `factor`, truncated toward zero.
pub fn mul_coins(coins: &DecCoins, factor: &Dec) -> Result<DecCoins, MathError> {
    let mut out = empty_coins(coins.env());
    for (token, amount) in coins.iter() {
        let product = amount.mul(factor)?;
        if !product.is_zero() {
            out.set(token, product);
        }
    }
    Ok(out)
}

/// Integer parts of every positive entry.
pub fn truncate_coins(coins: &DecCoins) -> Result<Map<Address, i128>, MathError> {
    let mut out = Map::new(coins.env());
    for (token, amount) in coins.iter() {
        if amount.is_negative() {
            return Err(MathError::NegativeResult);
        }
        let whole = amount.truncate_int()?;
        if whole > 0 {
            out.set(token, whole);
        }
    }
    Ok(out)
}

pub fn is_all_zero(coins: &DecCoins) -> bool {
    coins.values().iter().all(|v| v.is_zero())
}

// ============================================================
// ACCUMULATOR VALUES
// ============================================================

/// A growth value that supports the outside/inside bookkeeping.
///
/// Implemented for a single per-token growth (spread rewards) and for the
/// per-uptime vector of them (incentives), so tick crossing and range math
/// are written once.
pub trait Accumulator: Sized + Clone {
    fn accum_add(&self, other: &Self) -> Result<Self, AccumError>;
    fn accum_sub(&self, other: &Self) -> Result<Self, AccumError>;
    /// Zero value with the same shape as `self`
    fn zeroed(&self) -> Self;
}

impl Accumulator for DecCoins {
    fn accum_add(&self, other: &Self) -> Result<Self, AccumError> {
        let mut out = self.clone();
        for (token, amount) in other.iter() {
            add_coin(&mut out, &token, &amount)?;
        }
        Ok(out)
    }

    fn accum_sub(&self, other: &Self) -> Result<Self, AccumError> {
        let mut out = self.clone();
        for (token, amount) in other.iter() {
            add_coin(&mut out, &token, &amount.neg())?;
        }
        Ok(out)
    }

    fn zeroed(&self) -> Self {
        empty_coins(self.env())
    }
}

impl Accumulator for Vec<DecCoins> {
    fn accum_add(&self, other: &Self) -> Result<Self, AccumError> {
        zip_tiers(self, other, |a, b| a.accum_add(b))
    }

    fn accum_sub(&self, other: &Self) -> Result<Self, AccumError> {
        zip_tiers(self, other, |a, b| a.accum_sub(b))
    }

    fn zeroed(&self) -> Self {
        let env = self.env();
        let mut out = Vec::new(env);
        for _ in 0..self.len() {
            out.push_back(empty_coins(env));
        }
        out
    }
}

fn zip_tiers(
    a: &Vec<DecCoins>,
    b: &Vec<DecCoins>,
    op: impl Fn(&DecCoins, &DecCoins) -> Result<DecCoins, AccumError>,
) -> Result<Vec<DecCoins>, AccumError> {
    if a.len() != b.len() {
        return Err(AccumError::UptimeLengthMismatch);
    }
    let mut out = Vec::new(a.env());
    for (left, right) in a.iter().zip(b.iter()) {
        out.push_back(op(&left, &right)?);
    }
    Ok(out)
}
