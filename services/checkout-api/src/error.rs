//! Error types for the Checkout API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use coursepay_billing_core::BillingError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: &'static str,
    pub message: String,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Course not found!")]
    CourseNotFound,

    #[error("Purchase not found")]
    PurchaseNotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Error while creating payment session")]
    PaymentSessionFailed,

    #[error("Billing error")]
    Billing(#[source] BillingError),
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::CourseNotFound => Self::CourseNotFound,
            BillingError::PurchaseNotFound => Self::PurchaseNotFound,
            BillingError::MissingPaymentUrl => Self::PaymentSessionFailed,
            other => Self::Billing(other),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::CourseNotFound | Self::PurchaseNotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::PaymentSessionFailed => StatusCode::BAD_REQUEST,
            Self::Billing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::PurchaseNotFound => "PURCHASE_NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::PaymentSessionFailed => "PAYMENT_SESSION_FAILED",
            Self::Billing(_) => "INTERNAL_ERROR",
        }
    }

    fn is_internal(&self) -> bool {
        matches!(self, Self::Billing(_))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // Internal details stay in the logs
        let message = if self.is_internal() {
            tracing::error!(error = ?self, "Internal API error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            success: false,
            code,
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
