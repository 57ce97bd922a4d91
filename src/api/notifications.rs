//! Notification endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{error::AppResult, models::notification::Notification};

use super::AuthenticatedUser;

/// Notifications for the authenticated user, newest first
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notifications", body = Vec<Notification>)
    )
)]
pub async fn list_notifications(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = state
        .services
        .notifications
        .list_for_user(claims.user_id)
        .await?;
    Ok(Json(notifications))
}

/// Mark one notification as read
#[utoipa::path(
    post,
    path = "/notifications/{id}/read",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 204, description = "Marked read"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state
        .services
        .notifications
        .mark_read(id, claims.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
