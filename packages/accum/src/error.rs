// SPDX-License-Identifier: MIT

use tidepool_math::MathError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AccumError {
    Math(MathError),
    /// Uptime is not one of SUPPORTED_UPTIMES
    UnsupportedUptime,
    /// Growth inside a range went below a position's snapshot
    NegativeGrowth,
    /// Uptime vectors of different lengths were combined
    UptimeLengthMismatch,
}

impl From<MathError> for AccumError {
    fn from(err: MathError) -> Self {
        AccumError::Math(err)
    }
}
