//! Billing errors

use thiserror::Error;

/// Billing errors
#[derive(Error, Debug)]
pub enum BillingError {
    /// Course not found
    #[error("course not found")]
    CourseNotFound,

    /// Purchase not found
    #[error("purchase not found")]
    PurchaseNotFound,

    /// Provider accepted the request but returned no payment URL
    #[error("provider returned no payment url")]
    MissingPaymentUrl,

    /// Provider response could not be understood
    #[error("invalid provider response: {0}")]
    InvalidPaymentResponse(String),

    /// Payment provider error (network or non-success status)
    #[error("provider error: {0}")]
    ProviderError(String),

    /// Amount could not be converted for the provider
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] coursepay_types::MoneyError),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] coursepay_db::DbError),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl BillingError {
    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CourseNotFound | Self::PurchaseNotFound)
    }

    /// Check if this is a provider error
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::ProviderError(_) | Self::InvalidPaymentResponse(_) | Self::MissingPaymentUrl
        )
    }
}
