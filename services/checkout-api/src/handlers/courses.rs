//! Purchase query handlers

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use coursepay_billing_core::CourseWithStatus;
use coursepay_types::PurchaseWithCourse;

use super::shared::{parse_course_id, record_op_duration};
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedCoursesResponse {
    pub purchased_course: Vec<PurchaseWithCourse>,
}

/// GET /api/v1/purchase/course/{courseId}/detail-with-status
pub async fn course_detail_with_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<String>,
) -> ApiResult<Json<CourseWithStatus>> {
    let start = Instant::now();
    let course_id = parse_course_id(&course_id)?;

    let result = state.purchases.course_detail(user.user_id, course_id).await;
    record_op_duration("course_detail", start, result.is_ok());

    Ok(Json(result?))
}

/// GET /api/v1/purchase
///
/// Every completed purchase on the platform, with its course.
pub async fn list_purchased_courses(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<PurchasedCoursesResponse>> {
    let start = Instant::now();

    let result = state.purchases.purchased_courses().await;
    record_op_duration("list_purchased", start, result.is_ok());

    Ok(Json(PurchasedCoursesResponse {
        purchased_course: result?,
    }))
}
