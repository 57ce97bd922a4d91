//! Driver weekly-schedule models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// One weekly-schedule entry, unique per (driver_id, day_of_week)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DriverScheduleEntry {
    pub id: i32,
    pub driver_id: i32,
    /// Day of week (0=Monday, 6=Sunday)
    pub day_of_week: i16,
    pub available: bool,
    /// Trip occupying this slot, if any
    pub trip_id: Option<i32>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Upsert payload for a weekly-schedule entry
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertDriverSchedule {
    /// Day of week (0=Monday, 6=Sunday)
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: i16,
    pub available: bool,
    pub trip_id: Option<i32>,
}
