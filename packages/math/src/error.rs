// SPDX-License-Identifier: MIT
// Math Errors

/// Failures raised by the fixed-point and price arithmetic.
///
/// Contracts map these onto their own `#[contracterror]` codes, so every
/// variant here must stay meaningful to a caller.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MathError {
    /// Intermediate or final value does not fit the target width
    Overflow,
    /// Division by a zero value (includes zero-width price ranges)
    DivisionByZero,
    /// Operation requires a non-negative operand or result
    NegativeResult,
    /// Tick index outside [MIN_TICK, MAX_TICK]
    TickOutOfBounds,
    /// Price or sqrt price outside the representable tick range
    PriceOutOfBounds,
    /// Stored tick key has the wrong length or an inconsistent sign marker
    InvalidTickKey,
    /// Decimal literal could not be parsed
    InvalidDecimal,
}
