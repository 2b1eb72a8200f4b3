//! Common error types

use thiserror::Error;

/// Errors converting amounts between currency units and millimes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Amount is negative
    #[error("amount must not be negative: {0}")]
    Negative(String),

    /// Amount does not fit the provider's integer range
    #[error("amount out of range: {0}")]
    OutOfRange(String),
}

/// Error parsing a purchase status string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid purchase status: {0}")]
pub struct StatusParseError(pub String);
