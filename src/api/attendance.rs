//! Attendance endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::attendance::{
        AttendanceQuery, AttendanceRecord, CheckInRequest, CheckOutRequest, MarkAbsentRequest,
    },
};

use super::AuthenticatedUser;

/// Check a user in for today
#[utoipa::path(
    post,
    path = "/attendance/check-in",
    tag = "attendance",
    security(("bearer_auth" = [])),
    request_body = CheckInRequest,
    responses(
        (status = 201, description = "Checked in", body = AttendanceRecord)
    )
)]
pub async fn check_in(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CheckInRequest>,
) -> AppResult<(StatusCode, Json<AttendanceRecord>)> {
    claims.require_write_attendance()?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let record = state
        .services
        .attendance
        .check_in(data.user_id, data.location.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Check a user out for a given day
#[utoipa::path(
    post,
    path = "/attendance/check-out",
    tag = "attendance",
    security(("bearer_auth" = [])),
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Checked out", body = AttendanceRecord),
        (status = 404, description = "No check-in found for that day")
    )
)]
pub async fn check_out(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CheckOutRequest>,
) -> AppResult<Json<AttendanceRecord>> {
    claims.require_write_attendance()?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let record = state
        .services
        .attendance
        .check_out(data.user_id, data.date)
        .await?;
    Ok(Json(record))
}

/// Mark a user absent for a given day
#[utoipa::path(
    post,
    path = "/attendance/absent",
    tag = "attendance",
    security(("bearer_auth" = [])),
    request_body = MarkAbsentRequest,
    responses(
        (status = 200, description = "Marked absent", body = AttendanceRecord)
    )
)]
pub async fn mark_absent(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<MarkAbsentRequest>,
) -> AppResult<Json<AttendanceRecord>> {
    claims.require_write_attendance()?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let record = state
        .services
        .attendance
        .mark_absent(data.user_id, data.date, data.notes.as_deref())
        .await?;
    Ok(Json(record))
}

/// Attendance roster for one day
#[utoipa::path(
    get,
    path = "/attendance/{date}",
    tag = "attendance",
    security(("bearer_auth" = [])),
    params(("date" = String, Path, description = "Day (YYYY-MM-DD)")),
    responses(
        (status = 200, description = "Records for the day", body = Vec<AttendanceRecord>)
    )
)]
pub async fn list_for_date(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<Vec<AttendanceRecord>>> {
    claims.require_read_attendance()?;
    let records = state.services.attendance.list_for_date(date).await?;
    Ok(Json(records))
}

/// One user's attendance history
#[utoipa::path(
    get,
    path = "/attendance/users/{id}",
    tag = "attendance",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID"),
        AttendanceQuery
    ),
    responses(
        (status = 200, description = "User attendance history", body = Vec<AttendanceRecord>)
    )
)]
pub async fn list_for_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(user_id): Path<i32>,
    Query(query): Query<AttendanceQuery>,
) -> AppResult<Json<Vec<AttendanceRecord>>> {
    claims.require_read_attendance()?;
    let records = state
        .services
        .attendance
        .list_for_user(user_id, query.from, query.to)
        .await?;
    Ok(Json(records))
}
