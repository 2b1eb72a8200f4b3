//! Konnect HTTP client against a mock server

mod common;

use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coursepay_billing_core::{
    BillingError, InitPaymentRequest, KonnectProvider, PaymentProvider, PaymentStatus,
};
use coursepay_types::{Course, CourseId, PurchaseId, UserId};

fn provider(server: &MockServer) -> KonnectProvider {
    let config = common::test_config().with_base_url(server.uri());
    KonnectProvider::new(config).unwrap()
}

fn course() -> Course {
    Course {
        id: CourseId::new(),
        title: "Rust for Web".to_string(),
        price: dec!(50),
        creator_id: UserId::new(),
        lecture_ids: Vec::new(),
        enrolled_students: Vec::new(),
    }
}

#[tokio::test]
async fn test_init_payment() {
    let server = MockServer::start().await;
    let purchase_id = PurchaseId::new();

    Mock::given(method("POST"))
        .and(path("/payments/init-payment"))
        .and(header("x-api-key", "test-api-key"))
        .and(body_partial_json(json!({
            "receiverWalletId": "wallet-test",
            "token": "TND",
            "amount": 50000,
            "type": "immediate",
            "orderId": purchase_id.to_string(),
            "checkoutForm": true,
            "silentWebhook": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payUrl": "https://pay.example/checkout/abc",
            "paymentRef": "ref-abc",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request =
        InitPaymentRequest::for_purchase(&common::test_config(), &course(), purchase_id).unwrap();
    let response = provider(&server).init_payment(&request).await.unwrap();

    assert_eq!(
        response.pay_url.as_deref(),
        Some("https://pay.example/checkout/abc")
    );
    assert_eq!(response.payment_ref.as_deref(), Some("ref-abc"));
}

#[tokio::test]
async fn test_init_payment_without_pay_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/init-payment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let request =
        InitPaymentRequest::for_purchase(&common::test_config(), &course(), PurchaseId::new())
            .unwrap();
    let response = provider(&server).init_payment(&request).await.unwrap();

    assert!(response.pay_url.is_none());
    assert!(response.payment_ref.is_none());
}

#[tokio::test]
async fn test_init_payment_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/init-payment"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let request =
        InitPaymentRequest::for_purchase(&common::test_config(), &course(), PurchaseId::new())
            .unwrap();
    let result = provider(&server).init_payment(&request).await;

    match result {
        Err(BillingError::ProviderError(msg)) => assert!(msg.contains("500")),
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_payment() {
    let server = MockServer::start().await;
    let purchase_id = PurchaseId::new();

    Mock::given(method("GET"))
        .and(path("/payments/ref-abc"))
        .and(header("x-api-key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payment": {
                "id": "ref-abc",
                "status": "completed",
                "amount": 50000,
                "orderId": purchase_id.to_string(),
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payment = provider(&server).get_payment("ref-abc").await.unwrap();

    assert_eq!(payment.status, PaymentStatus::Completed);
    assert_eq!(payment.amount, Some(50_000));
    assert_eq!(payment.order_id, Some(purchase_id.to_string()));
}

#[tokio::test]
async fn test_get_payment_unexpected_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/ref-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let result = provider(&server).get_payment("ref-abc").await;

    assert!(matches!(
        result,
        Err(BillingError::InvalidPaymentResponse(_))
    ));
}

#[tokio::test]
async fn test_get_payment_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = provider(&server).get_payment("missing").await;

    assert!(matches!(result, Err(BillingError::ProviderError(_))));
}
