//! Vehicle model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::VehicleStatus;

/// A fleet asset
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vehicle {
    pub id: i32,
    pub plate: String,
    pub model: String,
    pub status: VehicleStatus,
}

/// Request body for setting a vehicle's status (e.g. into maintenance)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVehicleStatus {
    pub status: VehicleStatus,
}
