//! Derived operations statistics and the aggregate overview snapshot

use serde::Serialize;
use utoipa::ToSchema;

use super::{
    driver::DriverOverview,
    trip::{ActiveTrip, PendingTrip},
    vehicle::Vehicle,
};

/// Counts derived from the live operations state, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct OperationsStats {
    /// Trips currently in progress
    pub active_trips: i64,
    /// Drivers with derived status `available`
    pub available_drivers: i64,
    /// Vehicles with status `available`
    pub operational_vehicles: i64,
    /// Scheduled trips with no driver assigned
    pub pending_assignments: i64,
    /// All vehicles regardless of status
    pub total_vehicles: i64,
}

/// Consistent snapshot of the operations dashboard state
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OperationsOverview {
    pub active_trips: Vec<ActiveTrip>,
    pub drivers: Vec<DriverOverview>,
    pub pending_trips: Vec<PendingTrip>,
    pub vehicles: Vec<Vehicle>,
    pub stats: OperationsStats,
}
