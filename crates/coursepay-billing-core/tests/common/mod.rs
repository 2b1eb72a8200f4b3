//! Common test utilities for coursepay-billing-core integration tests

pub mod mock_provider;

use std::sync::Arc;

use coursepay_billing_core::{KonnectConfig, PurchaseService, Stores};

#[allow(unused_imports)]
pub use mock_provider::MockProvider;
#[allow(unused_imports)]
pub use coursepay_db::testing::MemoryStore;

/// Konnect config pointing at example hosts
#[allow(dead_code)]
pub fn test_config() -> KonnectConfig {
    KonnectConfig::new(
        "test-api-key",
        "wallet-test",
        "https://api.example.com",
        "https://learn.example.com",
    )
}

/// Repository handles backed by one in-memory store
#[allow(dead_code)]
pub fn stores(store: &MemoryStore) -> Stores {
    Stores {
        users: Arc::new(store.clone()),
        courses: Arc::new(store.clone()),
        lectures: Arc::new(store.clone()),
        purchases: Arc::new(store.clone()),
    }
}

/// Purchase service over the given store and provider
#[allow(dead_code)]
pub fn service(store: &MemoryStore, provider: Arc<MockProvider>) -> PurchaseService {
    PurchaseService::with_provider(stores(store), provider, test_config())
}
