//! Scripted payment provider for testing

use std::sync::Mutex;

use async_trait::async_trait;

use coursepay_billing_core::{
    BillingError, InitPaymentRequest, InitPaymentResponse, PaymentDetails, PaymentProvider,
    PaymentStatus,
};

use super::MemoryStore;

/// Payment provider that replays configured answers and records calls
pub struct MockProvider {
    store: MemoryStore,
    init_response: Mutex<Option<InitPaymentResponse>>,
    payment: Mutex<Option<PaymentDetails>>,
    /// Requests received by `init_payment`
    pub init_requests: Mutex<Vec<InitPaymentRequest>>,
    /// Purchase count in the store at each `init_payment` call
    pub purchases_at_init: Mutex<Vec<usize>>,
}

impl MockProvider {
    /// Provider whose calls fail until configured
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            init_response: Mutex::new(None),
            payment: Mutex::new(None),
            init_requests: Mutex::new(Vec::new()),
            purchases_at_init: Mutex::new(Vec::new()),
        }
    }

    /// Answer `init_payment` with this URL and reference
    pub fn with_checkout(self, pay_url: Option<&str>, payment_ref: Option<&str>) -> Self {
        *self.init_response.lock().unwrap() = Some(InitPaymentResponse {
            pay_url: pay_url.map(String::from),
            payment_ref: payment_ref.map(String::from),
        });
        self
    }

    /// Answer `get_payment` with this payment
    pub fn set_payment(&self, status: PaymentStatus, amount: Option<i64>, order_id: Option<String>) {
        *self.payment.lock().unwrap() = Some(PaymentDetails {
            status,
            amount,
            order_id,
        });
    }

    pub fn init_calls(&self) -> usize {
        self.init_requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentProvider for MockProvider {
    async fn init_payment(
        &self,
        request: &InitPaymentRequest,
    ) -> Result<InitPaymentResponse, BillingError> {
        self.init_requests.lock().unwrap().push(request.clone());
        self.purchases_at_init
            .lock()
            .unwrap()
            .push(self.store.purchases.len());

        self.init_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| BillingError::ProviderError("connection refused".to_string()))
    }

    async fn get_payment(&self, _payment_ref: &str) -> Result<PaymentDetails, BillingError> {
        self.payment
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| BillingError::ProviderError("connection refused".to_string()))
    }
}
