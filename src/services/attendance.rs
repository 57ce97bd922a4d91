//! Attendance computation
//!
//! Derives check-in lateness, hours worked, and overtime from raw
//! timestamps, and enforces one record per user per day through the
//! repository's upserts.

use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;

use crate::{
    config::AttendanceConfig,
    error::{AppError, AppResult},
    models::{attendance::AttendanceRecord, enums::AttendanceStatus},
    repository::Repository,
};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Late iff the check-in hour has reached the threshold (9:00 by default,
/// local wall clock)
pub(crate) fn checkin_status(check_in: NaiveTime, late_threshold_hour: u32) -> AttendanceStatus {
    if check_in.hour() >= late_threshold_hour {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}

/// Minutes between check-in and check-out. Times are stored without a date,
/// so a check-out earlier than the check-in is read as a shift that crossed
/// midnight and gets a day added.
pub(crate) fn worked_minutes(check_in: NaiveTime, check_out: NaiveTime) -> i64 {
    let minutes = (check_out - check_in).num_minutes();
    if minutes < 0 {
        minutes + MINUTES_PER_DAY
    } else {
        minutes
    }
}

/// Hours worked, rounded to 2 decimals
pub(crate) fn hours_from_minutes(minutes: i64) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
}

/// Overtime beyond the standard workday, floored at zero and rounded to 2
/// decimals
pub(crate) fn overtime_for(hours_worked: Decimal, standard_hours: i64) -> Decimal {
    (hours_worked - Decimal::from(standard_hours))
        .max(Decimal::ZERO)
        .round_dp(2)
}

/// Truncate to minute precision
fn to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).expect("valid truncated time")
}

#[derive(Clone)]
pub struct AttendanceService {
    repository: Repository,
    config: AttendanceConfig,
}

impl AttendanceService {
    pub fn new(repository: Repository, config: AttendanceConfig) -> Self {
        Self { repository, config }
    }

    /// Check a user in for today. A repeated check-in on the same day
    /// overwrites the earlier one.
    pub async fn check_in(
        &self,
        user_id: i32,
        location: Option<&str>,
    ) -> AppResult<AttendanceRecord> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;

        let now = Local::now();
        let date = now.date_naive();
        let time = to_minute(now.time());

        let status = checkin_status(time, self.config.late_threshold_hour);
        let notes = match status {
            AttendanceStatus::Late => Some("Late arrival"),
            _ => None,
        };

        self.repository
            .attendance
            .upsert_check_in(user_id, date, time, status, location, notes)
            .await
    }

    /// Check a user out for the given day, deriving hours worked and
    /// overtime. Fails when no check-in exists for that day.
    pub async fn check_out(&self, user_id: i32, date: NaiveDate) -> AppResult<AttendanceRecord> {
        let record = self
            .repository
            .attendance
            .get_by_user_date(user_id, date)
            .await?;

        let check_in = record
            .and_then(|r| r.check_in)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No check-in found for user {} on {}",
                    user_id, date
                ))
            })?;

        let check_out = to_minute(Local::now().time());
        let hours_worked = hours_from_minutes(worked_minutes(check_in, check_out));
        let overtime = overtime_for(hours_worked, self.config.standard_workday_hours);

        self.repository
            .attendance
            .update_check_out(user_id, date, check_out, hours_worked, overtime)
            .await
    }

    /// Record a user absent for the given day
    pub async fn mark_absent(
        &self,
        user_id: i32,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> AppResult<AttendanceRecord> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository
            .attendance
            .upsert_absent(user_id, date, notes.unwrap_or("Marked absent"))
            .await
    }

    /// Attendance roster for one day
    pub async fn list_for_date(&self, date: NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
        self.repository.attendance.list_for_date(date).await
    }

    /// One user's history, optionally bounded by dates
    pub async fn list_for_user(
        &self,
        user_id: i32,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<AttendanceRecord>> {
        self.repository.attendance.list_for_user(user_id, from, to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn checkin_before_nine_is_present() {
        assert_eq!(checkin_status(time(8, 59), 9), AttendanceStatus::Present);
        assert_eq!(checkin_status(time(6, 0), 9), AttendanceStatus::Present);
    }

    #[test]
    fn checkin_at_or_after_nine_is_late() {
        assert_eq!(checkin_status(time(9, 0), 9), AttendanceStatus::Late);
        assert_eq!(checkin_status(time(9, 1), 9), AttendanceStatus::Late);
        assert_eq!(checkin_status(time(14, 30), 9), AttendanceStatus::Late);
    }

    #[test]
    fn checkin_threshold_is_configurable() {
        assert_eq!(checkin_status(time(9, 30), 10), AttendanceStatus::Present);
        assert_eq!(checkin_status(time(10, 0), 10), AttendanceStatus::Late);
    }

    #[test]
    fn worked_minutes_same_day() {
        assert_eq!(worked_minutes(time(8, 0), time(17, 0)), 540);
        assert_eq!(worked_minutes(time(8, 30), time(12, 45)), 255);
        assert_eq!(worked_minutes(time(9, 0), time(9, 0)), 0);
    }

    #[test]
    fn worked_minutes_wraps_across_midnight() {
        // Night drive: 22:00 to 06:00 is 8 hours, not -16
        assert_eq!(worked_minutes(time(22, 0), time(6, 0)), 480);
        assert_eq!(worked_minutes(time(23, 30), time(0, 15)), 45);
    }

    #[test]
    fn hours_round_to_two_decimals() {
        // 500 minutes = 8.3333... hours
        assert_eq!(hours_from_minutes(500), dec("8.33"));
        assert_eq!(hours_from_minutes(540), dec("9.00").normalize());
        // 505 minutes = 8.41666... hours
        assert_eq!(hours_from_minutes(505), dec("8.42"));
    }

    #[test]
    fn overtime_is_floored_at_zero() {
        assert_eq!(overtime_for(dec("6.50"), 8), Decimal::ZERO);
        assert_eq!(overtime_for(dec("8.00"), 8), Decimal::ZERO);
        assert_eq!(overtime_for(dec("9.25"), 8), dec("1.25"));
        assert_eq!(overtime_for(dec("12.75"), 8), dec("4.75"));
    }

    #[test]
    fn full_shift_derivation() {
        // 08:30 to 18:15 is 9h45, 1.75h of overtime
        let minutes = worked_minutes(time(8, 30), time(18, 15));
        let hours = hours_from_minutes(minutes);
        assert_eq!(hours, dec("9.75"));
        assert_eq!(overtime_for(hours, 8), dec("1.75"));
    }
}
