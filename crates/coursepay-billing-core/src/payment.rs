//! Konnect payment payloads
//!
//! Request and response shapes of the Konnect payments API.

use serde::{Deserialize, Serialize};

use coursepay_types::{to_millimes, Course, PurchaseId, User};

use crate::config::KonnectConfig;
use crate::error::BillingError;

/// Payment methods offered on the Konnect checkout form
pub const ACCEPTED_PAYMENT_METHODS: [&str; 3] = ["wallet", "bank_card", "e-DINAR"];

/// Body of `POST /payments/init-payment`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitPaymentRequest {
    pub receiver_wallet_id: String,
    pub token: String,
    /// Amount in millimes
    pub amount: i64,
    #[serde(rename = "type")]
    pub payment_type: String,
    pub description: String,
    pub accepted_payment_methods: Vec<String>,
    /// Minutes until the payment expires
    pub lifespan: u32,
    pub checkout_form: bool,
    pub add_payment_fees_to_amount: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Our purchase id, echoed back by Konnect as `orderId`
    pub order_id: String,
    pub webhook: String,
    pub silent_webhook: bool,
    pub success_url: String,
    pub fail_url: String,
    pub theme: String,
}

impl InitPaymentRequest {
    /// Build the payment request for a pending purchase of `course`
    pub fn for_purchase(
        config: &KonnectConfig,
        course: &Course,
        purchase_id: PurchaseId,
    ) -> Result<Self, BillingError> {
        Ok(Self {
            receiver_wallet_id: config.receiver_wallet_id.clone(),
            token: config.currency.clone(),
            amount: to_millimes(course.price)?,
            payment_type: "immediate".to_string(),
            description: format!("Payment for course: {}", course.title),
            accepted_payment_methods: ACCEPTED_PAYMENT_METHODS
                .iter()
                .map(|m| (*m).to_string())
                .collect(),
            lifespan: config.lifespan_minutes,
            checkout_form: true,
            add_payment_fees_to_amount: false,
            first_name: None,
            last_name: None,
            phone_number: None,
            email: None,
            order_id: purchase_id.to_string(),
            webhook: config.webhook_url(),
            silent_webhook: true,
            success_url: config.success_url(course.id),
            fail_url: config.fail_url(course.id),
            theme: "light".to_string(),
        })
    }

    /// Prefill the checkout form with the buyer's contact details
    pub fn with_buyer(mut self, user: &User) -> Self {
        let (first, last) = user.split_name();
        self.first_name = Some(first.to_string());
        self.last_name = Some(last.to_string());
        self.email = Some(user.email.clone());
        self.phone_number = Some(user.phone_number.clone().unwrap_or_default());
        self
    }
}

/// Response of `POST /payments/init-payment`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitPaymentResponse {
    /// Checkout page the buyer is redirected to
    #[serde(default)]
    pub pay_url: Option<String>,
    /// Reference later passed to the webhook as `payment_ref`
    #[serde(default, alias = "payment_ref", alias = "payRef")]
    pub payment_ref: Option<String>,
}

/// Konnect payment status
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Payment confirmed
    Completed,
    /// Awaiting payment
    Pending,
    /// Any status this service does not act on
    #[serde(other)]
    Other,
}

/// Payment as reported by `GET /payments/{ref}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub status: PaymentStatus,
    /// Amount in millimes
    #[serde(default)]
    pub amount: Option<i64>,
    /// Purchase id we sent at initiation
    #[serde(default)]
    pub order_id: Option<String>,
}

/// Envelope of `GET /payments/{ref}`
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentDetailsResponse {
    pub payment: PaymentDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursepay_types::{CourseId, UserId};
    use rust_decimal_macros::dec;

    fn config() -> KonnectConfig {
        KonnectConfig::new("key", "wallet-1", "https://api.example.com", "https://app.example.com")
    }

    fn course() -> Course {
        Course {
            id: CourseId::new(),
            title: "Async Rust".to_string(),
            price: dec!(50),
            creator_id: UserId::new(),
            lecture_ids: vec![],
            enrolled_students: vec![],
        }
    }

    #[test]
    fn test_request_for_purchase() {
        let course = course();
        let purchase_id = PurchaseId::new();
        let req = InitPaymentRequest::for_purchase(&config(), &course, purchase_id).unwrap();

        assert_eq!(req.amount, 50_000);
        assert_eq!(req.token, "TND");
        assert_eq!(req.lifespan, 30);
        assert_eq!(req.order_id, purchase_id.to_string());
        assert_eq!(req.description, "Payment for course: Async Rust");
        assert_eq!(req.webhook, "https://api.example.com/api/payments/webhook");
        assert!(req.first_name.is_none());
    }

    #[test]
    fn test_request_wire_names() {
        let req = InitPaymentRequest::for_purchase(&config(), &course(), PurchaseId::new()).unwrap();
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["receiverWalletId"], "wallet-1");
        assert_eq!(json["type"], "immediate");
        assert_eq!(json["acceptedPaymentMethods"][2], "e-DINAR");
        assert_eq!(json["addPaymentFeesToAmount"], false);
        assert_eq!(json["silentWebhook"], true);
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_with_buyer_fills_contact_fields() {
        let user = User {
            id: UserId::new(),
            name: "Amira Ben Salah".to_string(),
            email: "amira@example.com".to_string(),
            phone_number: None,
            enrolled_courses: vec![],
        };
        let req = InitPaymentRequest::for_purchase(&config(), &course(), PurchaseId::new())
            .unwrap()
            .with_buyer(&user);

        assert_eq!(req.first_name.as_deref(), Some("Amira"));
        assert_eq!(req.last_name.as_deref(), Some("Ben Salah"));
        assert_eq!(req.email.as_deref(), Some("amira@example.com"));
        assert_eq!(req.phone_number.as_deref(), Some(""));
    }

    #[test]
    fn test_init_response_accepts_reference_aliases() {
        let a: InitPaymentResponse =
            serde_json::from_str(r#"{"payUrl":"https://pay","paymentRef":"ref-1"}"#).unwrap();
        let b: InitPaymentResponse =
            serde_json::from_str(r#"{"payUrl":"https://pay","payRef":"ref-2"}"#).unwrap();
        let c: InitPaymentResponse = serde_json::from_str("{}").unwrap();

        assert_eq!(a.payment_ref.as_deref(), Some("ref-1"));
        assert_eq!(b.payment_ref.as_deref(), Some("ref-2"));
        assert!(c.pay_url.is_none());
    }

    #[test]
    fn test_payment_details_unknown_status() {
        let details: PaymentDetailsResponse = serde_json::from_str(
            r#"{"payment":{"status":"expired","amount":75000,"orderId":"abc"}}"#,
        )
        .unwrap();
        assert_eq!(details.payment.status, PaymentStatus::Other);
        assert_eq!(details.payment.amount, Some(75_000));
    }
}
