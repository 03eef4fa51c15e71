//! Checked integer-cent arithmetic shared by the calculators.
//!
//! Every amount is an `i64` count of centavos. Rates are exact decimals;
//! a product of an amount and a rate is floored straight back to whole
//! centavos so rounding happens at each step, never once at the end.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};
use crate::models::Cents;

/// Floors a decimal to whole centavos.
pub(crate) fn floor_cents(value: Decimal, what: &str) -> EngineResult<Cents> {
    value.floor().to_i64().ok_or_else(|| {
        EngineError::computation(format!("{} does not fit in a cent amount: {}", what, value))
    })
}

/// `floor(amount × rate)`.
pub(crate) fn apply_rate(amount: Cents, rate: Decimal, what: &str) -> EngineResult<Cents> {
    let product = Decimal::from(amount)
        .checked_mul(rate)
        .ok_or_else(|| EngineError::computation(format!("{} overflowed", what)))?;
    floor_cents(product, what)
}

/// `amount × factor` with overflow detection.
pub(crate) fn multiply(amount: Cents, factor: i64, what: &str) -> EngineResult<Cents> {
    amount
        .checked_mul(factor)
        .ok_or_else(|| EngineError::computation(format!("{} overflowed", what)))
}

/// `a + b` with overflow detection.
pub(crate) fn add(a: Cents, b: Cents, what: &str) -> EngineResult<Cents> {
    a.checked_add(b)
        .ok_or_else(|| EngineError::computation(format!("{} overflowed", what)))
}

/// `floor(amount / divisor)` for a positive divisor.
pub(crate) fn floor_div(amount: Cents, divisor: i64) -> Cents {
    amount.div_euclid(divisor)
}
