//! Common test utilities for checkout-api router tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use checkout_api::auth::Claims;
use checkout_api::state::AppState;
use checkout_api::{build_router, Config};
use coursepay_billing_core::{
    BillingError, InitPaymentRequest, InitPaymentResponse, KonnectConfig, PaymentDetails,
    PaymentProvider, PaymentStatus, PurchaseService, Stores,
};
pub use coursepay_db::testing::MemoryStore;

pub const JWT_SECRET: &str = "router-test-secret";

/// Repository handles backed by one in-memory store
pub fn stores(store: &MemoryStore) -> Stores {
    Stores {
        users: Arc::new(store.clone()),
        courses: Arc::new(store.clone()),
        lectures: Arc::new(store.clone()),
        purchases: Arc::new(store.clone()),
    }
}

// ============================================================================
// Payment provider
// ============================================================================

/// Provider returning fixed answers; `None` makes the call fail
#[derive(Default)]
pub struct FixedProvider {
    pub checkout: Mutex<Option<InitPaymentResponse>>,
    pub payment: Mutex<Option<PaymentDetails>>,
}

impl FixedProvider {
    pub fn checkout(&self, pay_url: Option<&str>, payment_ref: Option<&str>) {
        *self.checkout.lock().unwrap() = Some(InitPaymentResponse {
            pay_url: pay_url.map(String::from),
            payment_ref: payment_ref.map(String::from),
        });
    }

    pub fn payment(&self, status: PaymentStatus, amount: i64, order_id: Uuid) {
        *self.payment.lock().unwrap() = Some(PaymentDetails {
            status,
            amount: Some(amount),
            order_id: Some(order_id.to_string()),
        });
    }
}

#[async_trait]
impl PaymentProvider for FixedProvider {
    async fn init_payment(
        &self,
        _request: &InitPaymentRequest,
    ) -> Result<InitPaymentResponse, BillingError> {
        self.checkout
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

// ============================================================================
// App
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub provider: Arc<FixedProvider>,
}

impl TestApp {
    /// Router over in-memory stores; the pool is never connected
    pub fn new() -> Self {
        let store = MemoryStore::default();
        let provider = Arc::new(FixedProvider::default());

        let konnect = KonnectConfig::new(
            "test-api-key",
            "wallet-test",
            "https://api.example.com",
            "https://learn.example.com",
        );
        let config = Config {
            http_port: 0,
            database_url: "postgres://localhost/unused".to_string(),
            jwt_secret: JWT_SECRET.to_string(),
            konnect: konnect.clone(),
            request_timeout: Duration::from_secs(5),
            metrics_enabled: false,
            run_migrations: false,
        };

        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("lazy pool");
        let purchases = PurchaseService::with_provider(stores(&store), provider.clone(), konnect);
        let state = AppState::new(purchases, pool, config);

        Self {
            router: build_router(state, None),
            store,
            provider,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Signed caller token for `user_id`
pub fn token_for(user_id: Uuid) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: jsonwebtoken::get_current_timestamp() as i64 + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Response body as JSON
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Response body as raw bytes
pub async fn raw_body(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
