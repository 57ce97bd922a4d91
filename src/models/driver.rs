//! Driver model and roster views

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{enums::DriverStatus, trip::TripSummary};

/// A staff member eligible to operate trips
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Driver {
    pub id: i32,
    /// Identity reference into the users table
    pub user_id: i32,
    pub rating: f64,
    /// Years of experience
    pub experience: i32,
    pub languages: Vec<String>,
    pub specialties: Vec<String>,
    pub total_trips: i32,
    pub average_rating: f64,
    pub on_time_percentage: f64,
    pub next_available: Option<NaiveDate>,
}

/// Raw roster row: a driver joined with their current in-progress trip,
/// before the availability derivation runs
#[derive(Debug, Clone)]
pub struct DriverWithTrip {
    pub driver: Driver,
    pub name: Option<String>,
    pub current_trip: Option<TripSummary>,
    pub vehicle_plate: Option<String>,
}

/// Driver roster entry with derived availability
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DriverOverview {
    pub id: i32,
    pub user_id: i32,
    pub name: Option<String>,
    pub rating: f64,
    pub experience: i32,
    pub languages: Vec<String>,
    pub specialties: Vec<String>,
    pub total_trips: i32,
    pub average_rating: f64,
    pub on_time_percentage: f64,
    /// Derived: `on_trip` when any trip is in progress, else `available`
    pub status: DriverStatus,
    pub current_trip_id: Option<i32>,
    pub current_trip: Option<TripSummary>,
    /// Plate of the vehicle bound to the current trip
    pub vehicle_plate: Option<String>,
    /// Days until the current trip ends, floored at zero
    pub days_until_available: i64,
}
