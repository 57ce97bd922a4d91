//! Trip table endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::trip::Trip};

use super::AuthenticatedUser;

/// List all trips, most recently created first
#[utoipa::path(
    get,
    path = "/trips",
    tag = "trips",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All trips", body = Vec<Trip>)
    )
)]
pub async fn list_trips(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Trip>>> {
    claims.require_read_operations()?;
    let trips = state.services.assignment.list_trips().await?;
    Ok(Json(trips))
}

/// Get one trip
#[utoipa::path(
    get,
    path = "/trips/{id}",
    tag = "trips",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Trip ID")),
    responses(
        (status = 200, description = "Trip", body = Trip),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn get_trip(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Trip>> {
    claims.require_read_operations()?;
    let trip = state.services.assignment.get_trip(id).await?;
    Ok(Json(trip))
}
