//! Fleet endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::vehicle::{UpdateVehicleStatus, Vehicle},
};

use super::AuthenticatedUser;

/// List all vehicles
#[utoipa::path(
    get,
    path = "/vehicles",
    tag = "fleet",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Fleet", body = Vec<Vehicle>)
    )
)]
pub async fn list_vehicles(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Vehicle>>> {
    claims.require_read_operations()?;
    let vehicles = state.services.assignment.list_vehicles().await?;
    Ok(Json(vehicles))
}

/// Set a vehicle's status (e.g. flag maintenance)
#[utoipa::path(
    put,
    path = "/vehicles/{id}/status",
    tag = "fleet",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = UpdateVehicleStatus,
    responses(
        (status = 200, description = "Vehicle updated", body = Vehicle),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn update_vehicle_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateVehicleStatus>,
) -> AppResult<Json<Vehicle>> {
    claims.require_manage_fleet()?;
    let vehicle = state
        .services
        .assignment
        .set_vehicle_status(id, data.status)
        .await?;
    Ok(Json(vehicle))
}
