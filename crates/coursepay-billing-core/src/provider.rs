//! Payment provider abstraction

use async_trait::async_trait;

use crate::error::BillingError;
use crate::payment::{InitPaymentRequest, InitPaymentResponse, PaymentDetails};

/// Payment provider trait
///
/// Abstracts payment processing so the purchase flow can run against
/// Konnect or a test double.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Start a payment and obtain the checkout URL
    async fn init_payment(
        &self,
        request: &InitPaymentRequest,
    ) -> Result<InitPaymentResponse, BillingError>;

    /// Fetch the authoritative state of a payment
    async fn get_payment(&self, payment_ref: &str) -> Result<PaymentDetails, BillingError>;
}
