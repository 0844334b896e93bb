// SPDX-License-Identifier: MIT

use tidepool_accum::AccumError;
use tidepool_math::MathError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TickError {
    Math(MathError),
    Accum(AccumError),
    /// A liquidity removal would take liquidity_gross below zero
    NegativeLiquidityGross,
}

impl From<MathError> for TickError {
    fn from(err: MathError) -> Self {
        TickError::Math(err)
    }
}

impl From<AccumError> for TickError {
    fn from(err: AccumError) -> Self {
        TickError::Accum(err)
    }
}
