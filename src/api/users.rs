//! User roster endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, models::user::User};

use super::AuthenticatedUser;

/// Staff roster
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = Vec<User>)
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<User>>> {
    claims.require_read_users()?;
    let users = state.services.auth.list_users().await?;
    Ok(Json(users))
}
