//! Currency conversion between dinars and millimes
//!
//! Course prices and purchase amounts are kept in currency units (TND).
//! The payment provider works in millimes, 1000 to the dinar.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::MoneyError;

/// Millimes in one dinar
pub const MILLIMES_PER_UNIT: i64 = 1_000;

/// Convert a currency amount to provider millimes.
///
/// Sub-millime fractions are rounded to the nearest millime.
pub fn to_millimes(amount: Decimal) -> Result<i64, MoneyError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(MoneyError::Negative(amount.to_string()));
    }

    amount
        .checked_mul(Decimal::from(MILLIMES_PER_UNIT))
        .map(|m| m.round())
        .and_then(|m| m.to_i64())
        .ok_or_else(|| MoneyError::OutOfRange(amount.to_string()))
}

/// Convert provider millimes back to a currency amount.
pub fn from_millimes(millimes: i64) -> Decimal {
    Decimal::new(millimes, 3).normalize()
}
