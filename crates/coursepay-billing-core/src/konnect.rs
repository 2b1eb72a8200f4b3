//! Konnect payment provider implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, instrument};

use crate::config::KonnectConfig;
use crate::error::BillingError;
use crate::payment::{InitPaymentRequest, InitPaymentResponse, PaymentDetails, PaymentDetailsResponse};
use crate::provider::PaymentProvider;

/// Konnect payment provider
#[derive(Clone)]
pub struct KonnectProvider {
    client: Client,
    config: KonnectConfig,
}

impl KonnectProvider {
    /// Create a new Konnect provider
    pub fn new(config: KonnectConfig) -> Result<Self, BillingError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BillingError::Internal(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Make authenticated request to Konnect
    async fn konnect_request<B, T>(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, BillingError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.config.api_url(endpoint);

        let mut request = self
            .client
            .request(method, &url)
            .header("x-api-key", &self.config.api_key);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, "Konnect API request failed");
            BillingError::ProviderError(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Konnect API error");
            return Err(BillingError::ProviderError(format!(
                "Konnect API error: {status}"
            )));
        }

        response.json::<T>().await.map_err(|e| {
            error!(error = %e, "Failed to parse Konnect response");
            BillingError::InvalidPaymentResponse(e.to_string())
        })
    }
}

#[async_trait]
impl PaymentProvider for KonnectProvider {
    #[instrument(skip(self, request), fields(order_id = %request.order_id, amount = request.amount))]
    async fn init_payment(
        &self,
        request: &InitPaymentRequest,
    ) -> Result<InitPaymentResponse, BillingError> {
        debug!("Initiating Konnect payment");

        self.konnect_request(
            reqwest::Method::POST,
            "/payments/init-payment",
            Some(request),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_payment(&self, payment_ref: &str) -> Result<PaymentDetails, BillingError> {
        debug!("Fetching Konnect payment");

        let envelope: PaymentDetailsResponse = self
            .konnect_request(
                reqwest::Method::GET,
                &format!("/payments/{payment_ref}"),
                None::<&()>,
            )
            .await?;

        Ok(envelope.payment)
    }
}
