//! Trip model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{TripPriority, TripStatus};

/// A scheduled or active safari journey
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Trip {
    pub id: i32,
    pub customer_name: String,
    pub package_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub driver_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub status: TripStatus,
    /// Completion percentage (0-100)
    pub progress: i32,
    pub current_location: Option<String>,
    pub next_stop: Option<String>,
    pub estimated_arrival: Option<String>,
    pub guests: i32,
    pub notes: Option<String>,
    /// Owning booking, when the trip originated from one
    pub booking_id: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An in-progress trip enriched with driver name and vehicle plate
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActiveTrip {
    pub id: i32,
    pub customer_name: String,
    pub package_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TripStatus,
    pub progress: i32,
    /// Defaults to "In transit" when the trip has no recorded location
    pub current_location: String,
    pub next_stop: Option<String>,
    pub estimated_arrival: Option<String>,
    pub guests: i32,
    pub driver_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub driver_name: Option<String>,
    pub vehicle_plate: Option<String>,
}

/// A scheduled trip still awaiting driver/vehicle assignment
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PendingTrip {
    pub id: i32,
    pub customer_name: String,
    pub package_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guests: i32,
    pub booking_id: Option<i32>,
    pub notes: Option<String>,
    /// Whole days until departure, rounded up from wall-clock now
    pub days_until_start: i64,
    pub priority: TripPriority,
}

/// Short trip reference embedded in driver roster entries
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TripSummary {
    pub id: i32,
    pub customer_name: String,
    pub package_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Request body for binding a driver and vehicle to a pending trip
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignTripRequest {
    #[validate(range(min = 1))]
    pub trip_id: i32,
    #[validate(range(min = 1))]
    pub driver_id: i32,
    #[validate(range(min = 1))]
    pub vehicle_id: i32,
}

/// Partial trip status update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTripStatus {
    pub status: TripStatus,
    #[validate(range(min = 0, max = 100))]
    pub progress: Option<i32>,
    pub current_location: Option<String>,
}
