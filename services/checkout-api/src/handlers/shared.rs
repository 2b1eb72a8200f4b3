//! Shared handler utilities
//!
//! Input validation and metrics helpers used across handlers.

use std::time::Instant;

use coursepay_types::CourseId;

use crate::error::ApiError;

// ============================================================================
// Input Validation
// ============================================================================

/// Maximum length accepted for a Konnect payment reference
const MAX_PAYMENT_REF_LEN: usize = 128;

/// Validate a payment reference before it is placed in a Konnect URL path.
///
/// Allows ASCII alphanumerics, `-` and `_`.
pub fn validate_payment_ref(payment_ref: Option<&str>) -> Result<&str, ApiError> {
    let payment_ref = payment_ref.map(str::trim).unwrap_or_default();

    if payment_ref.is_empty() {
        return Err(ApiError::BadRequest("Missing payment reference".into()));
    }

    if payment_ref.len() > MAX_PAYMENT_REF_LEN {
        return Err(ApiError::BadRequest(format!(
            "Payment reference too long (max {MAX_PAYMENT_REF_LEN} chars)"
        )));
    }

    if !payment_ref
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::BadRequest(
            "Payment reference contains invalid characters".into(),
        ));
    }

    Ok(payment_ref)
}

/// Parse a course id from user input.
///
/// Anything that is not a course id names no course.
pub fn parse_course_id(raw: &str) -> Result<CourseId, ApiError> {
    CourseId::parse(raw.trim()).map_err(|_| ApiError::CourseNotFound)
}

// ============================================================================
// Metrics Helpers
// ============================================================================

/// Record operation duration with result label.
///
/// Labels: operation, result (ok/err)
#[inline]
pub fn record_op_duration(operation: &'static str, start: Instant, success: bool) {
    let result = if success { "ok" } else { "err" };
    metrics::histogram!(
        "coursepay_operation_duration_seconds",
        "operation" => operation,
        "result" => result
    )
    .record(start.elapsed().as_secs_f64());
}

// ============================================================================
// Tests
// ============================================================================
