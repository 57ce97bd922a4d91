//! Authentication endpoints

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{LoginRequest, LoginResponse, User},
};

use super::AuthenticatedUser;

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(data): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let (token, user) = state
        .services
        .auth
        .authenticate(&data.email, &data.password)
        .await?;
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        user,
    }))
}

/// Current authenticated user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = User)
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<User>> {
    let user = state.services.auth.get_user(claims.user_id).await?;
    Ok(Json(user))
}
