//! Checkout session handler

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::shared::{parse_course_id, record_op_duration};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    pub course_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    /// Konnect payment page
    pub url: String,
}

/// POST /api/v1/purchase/checkout/create-checkout-session
///
/// Records a pending purchase and returns the Konnect payment page.
pub async fn create_checkout_session(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<CreateCheckoutRequest>, JsonRejection>,
) -> ApiResult<Json<CheckoutResponse>> {
    let start = Instant::now();

    let Json(request) = body.map_err(|e| {
        tracing::debug!(error = %e.body_text(), "Rejected checkout body");
        ApiError::BadRequest("Invalid request body".into())
    })?;
    let raw_course_id = request
        .course_id
        .ok_or_else(|| ApiError::BadRequest("Missing courseId".into()))?;
    let course_id = parse_course_id(&raw_course_id)?;

    let result = state
        .purchases
        .create_checkout(user.user_id, course_id)
        .await;
    record_op_duration("create_checkout", start, result.is_ok());

    let session = result?;
    metrics::counter!("coursepay_checkouts_created_total").increment(1);

    tracing::info!(
        user_id = %user.user_id,
        course_id = %course_id,
        purchase_id = %session.purchase_id,
        "Checkout session created"
    );

    Ok(Json(CheckoutResponse {
        success: true,
        url: session.url,
    }))
}
