//! Coursepay Billing Core - Course purchase business logic
//!
//! Konnect integration, checkout creation, payment confirmation and
//! purchase queries.
//!
//! # Example
//!
//! ```rust,ignore
//! use coursepay_billing_core::{KonnectConfig, PurchaseService};
//! use coursepay_db::Repositories;
//!
//! let config = KonnectConfig::new(
//!     "konnect-api-key",
//!     "receiver-wallet-id",
//!     "https://api.example.com",
//!     "https://learn.example.com",
//! );
//!
//! let purchases = PurchaseService::new(repos, config)?;
//!
//! // Start a checkout and redirect the buyer
//! let session = purchases.create_checkout(user_id, course_id).await?;
//!
//! // Later, from the Konnect webhook
//! purchases.process_webhook(&payment_ref).await?;
//! ```

pub mod config;
pub mod error;
pub mod konnect;
pub mod payment;
pub mod provider;
pub mod service;

pub use config::KonnectConfig;
pub use error::BillingError;
pub use konnect::KonnectProvider;
pub use payment::{
    InitPaymentRequest, InitPaymentResponse, PaymentDetails, PaymentDetailsResponse, PaymentStatus,
};
pub use provider::PaymentProvider;
pub use service::{CheckoutSession, CourseWithStatus, PurchaseService, Stores, WebhookOutcome};
