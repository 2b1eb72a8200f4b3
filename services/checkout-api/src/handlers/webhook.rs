//! Konnect webhook handler

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use super::shared::{record_op_duration, validate_payment_ref};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WebhookQuery {
    pub payment_ref: Option<String>,
}

/// GET|POST /api/payments/webhook?payment_ref=...
///
/// Konnect only sends the payment reference; the payment itself is
/// re-read from Konnect before anything is written.
pub async fn konnect_webhook(
    State(state): State<AppState>,
    Query(query): Query<WebhookQuery>,
) -> ApiResult<StatusCode> {
    let start = Instant::now();

    let payment_ref = validate_payment_ref(query.payment_ref.as_deref()).inspect_err(|_| {
        tracing::warn!("Webhook without usable payment reference");
        metrics::counter!("coursepay_webhooks_processed_total", "status" => "rejected")
            .increment(1);
    })?;

    match state.purchases.process_webhook(payment_ref).await {
        Ok(outcome) => {
            metrics::counter!("coursepay_webhooks_processed_total", "status" => outcome.as_str())
                .increment(1);
            record_op_duration("process_webhook", start, true);
            Ok(StatusCode::OK)
        }
        Err(e) => {
            tracing::error!(error = ?e, payment_ref, "Webhook processing failed");
            let status = if e.is_not_found() {
                "not_found"
            } else if e.is_provider_error() {
                "provider_error"
            } else {
                "error"
            };
            metrics::counter!("coursepay_webhooks_processed_total", "status" => status)
                .increment(1);
            record_op_duration("process_webhook", start, false);
            Err(e.into())
        }
    }
}
