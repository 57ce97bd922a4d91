//! Operations endpoints (assignment engine, roster, pending queue)

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        driver::DriverOverview,
        schedule::{DriverScheduleEntry, UpsertDriverSchedule},
        stats::OperationsOverview,
        trip::{ActiveTrip, AssignTripRequest, PendingTrip, UpdateTripStatus},
    },
};

use super::AuthenticatedUser;

/// Trips currently in progress
#[utoipa::path(
    get,
    path = "/operations/trips/active",
    tag = "operations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active trips", body = Vec<ActiveTrip>)
    )
)]
pub async fn list_active_trips(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ActiveTrip>>> {
    claims.require_read_operations()?;
    let trips = state.services.assignment.list_active_trips().await?;
    Ok(Json(trips))
}

/// Driver roster with derived availability
#[utoipa::path(
    get,
    path = "/operations/drivers",
    tag = "operations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Driver roster", body = Vec<DriverOverview>)
    )
)]
pub async fn list_drivers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<DriverOverview>>> {
    claims.require_read_operations()?;
    let drivers = state.services.assignment.list_drivers().await?;
    Ok(Json(drivers))
}

/// Trips awaiting driver/vehicle assignment, by derived priority
#[utoipa::path(
    get,
    path = "/operations/trips/pending",
    tag = "operations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending trips", body = Vec<PendingTrip>)
    )
)]
pub async fn list_pending_trips(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<PendingTrip>>> {
    claims.require_read_operations()?;
    let trips = state.services.assignment.list_pending_trips().await?;
    Ok(Json(trips))
}

/// Assign a driver and vehicle to a pending trip
#[utoipa::path(
    post,
    path = "/operations/assign",
    tag = "operations",
    security(("bearer_auth" = [])),
    request_body = AssignTripRequest,
    responses(
        (status = 200, description = "Assignment performed; refreshed snapshot", body = OperationsOverview),
        (status = 404, description = "Trip, driver, or vehicle not found"),
        (status = 409, description = "Vehicle is not available")
    )
)]
pub async fn assign_trip(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<AssignTripRequest>,
) -> AppResult<Json<OperationsOverview>> {
    claims.require_write_operations()?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let overview = state
        .services
        .assignment
        .assign_trip_resources(data.trip_id, data.driver_id, data.vehicle_id)
        .await?;
    Ok(Json(overview))
}

/// Update a trip's status, progress, and location
#[utoipa::path(
    put,
    path = "/operations/trips/{id}/status",
    tag = "operations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Trip ID")),
    request_body = UpdateTripStatus,
    responses(
        (status = 200, description = "Trip updated; refreshed snapshot", body = OperationsOverview)
    )
)]
pub async fn update_trip_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(trip_id): Path<i32>,
    Json(data): Json<UpdateTripStatus>,
) -> AppResult<Json<OperationsOverview>> {
    claims.require_write_operations()?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let overview = state
        .services
        .assignment
        .update_trip_status(trip_id, &data)
        .await?;
    Ok(Json(overview))
}

/// Full dashboard snapshot (trips, drivers, pending queue, fleet, stats)
#[utoipa::path(
    get,
    path = "/operations/overview",
    tag = "operations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Operations overview", body = OperationsOverview)
    )
)]
pub async fn overview(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<OperationsOverview>> {
    claims.require_read_operations()?;
    let overview = state.services.assignment.operations_overview().await?;
    Ok(Json(overview))
}

/// A driver's weekly schedule
#[utoipa::path(
    get,
    path = "/operations/drivers/{id}/schedule",
    tag = "operations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Driver ID")),
    responses(
        (status = 200, description = "Weekly schedule", body = Vec<DriverScheduleEntry>)
    )
)]
pub async fn list_driver_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(driver_id): Path<i32>,
) -> AppResult<Json<Vec<DriverScheduleEntry>>> {
    claims.require_read_operations()?;
    let entries = state
        .services
        .assignment
        .list_driver_schedule(driver_id)
        .await?;
    Ok(Json(entries))
}

/// Upsert a driver's weekly-schedule entry for one day
#[utoipa::path(
    put,
    path = "/operations/drivers/{id}/schedule",
    tag = "operations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Driver ID")),
    request_body = UpsertDriverSchedule,
    responses(
        (status = 200, description = "Schedule entry upserted", body = DriverScheduleEntry)
    )
)]
pub async fn update_driver_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(driver_id): Path<i32>,
    Json(data): Json<UpsertDriverSchedule>,
) -> AppResult<Json<DriverScheduleEntry>> {
    claims.require_write_operations()?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let entry = state
        .services
        .assignment
        .update_driver_schedule(driver_id, &data)
        .await?;
    Ok(Json(entry))
}
