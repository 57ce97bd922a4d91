//! Attendance models (one record per user per day)

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::AttendanceStatus;

/// One attendance record, unique per (user_id, date)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: i32,
    pub user_id: i32,
    pub date: NaiveDate,
    /// Local time-of-day, minute precision
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub hours_worked: Option<Decimal>,
    pub overtime: Option<Decimal>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Check-in request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckInRequest {
    #[validate(range(min = 1))]
    pub user_id: i32,
    pub location: Option<String>,
}

/// Check-out request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckOutRequest {
    #[validate(range(min = 1))]
    pub user_id: i32,
    /// Day being checked out (YYYY-MM-DD)
    pub date: NaiveDate,
}

/// Mark-absent request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MarkAbsentRequest {
    #[validate(range(min = 1))]
    pub user_id: i32,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

/// Query parameters for attendance listings
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    /// Filter records from this date (YYYY-MM-DD)
    pub from: Option<NaiveDate>,
    /// Filter records until this date (YYYY-MM-DD)
    pub to: Option<NaiveDate>,
}
