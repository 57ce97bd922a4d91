//! Attendance repository for database operations
//!
//! One record per (user_id, date); both check-in and mark-absent are
//! insert-or-overwrite against that uniqueness key.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{attendance::AttendanceRecord, enums::AttendanceStatus},
};

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: Pool<Postgres>,
}

impl AttendanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get the record for one user on one day, if any
    pub async fn get_by_user_date(
        &self,
        user_id: i32,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceRecord>> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT * FROM attendance WHERE user_id = $1 AND date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    /// Upsert a check-in. A second check-in on the same day overwrites the
    /// first and clears any earlier check-out and derived hours.
    pub async fn upsert_check_in(
        &self,
        user_id: i32,
        date: NaiveDate,
        check_in: NaiveTime,
        status: AttendanceStatus,
        location: Option<&str>,
        notes: Option<&str>,
    ) -> AppResult<AttendanceRecord> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance (user_id, date, check_in, status, location, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, date) DO UPDATE
            SET check_in = EXCLUDED.check_in,
                status = EXCLUDED.status,
                location = EXCLUDED.location,
                notes = EXCLUDED.notes,
                check_out = NULL,
                hours_worked = NULL,
                overtime = NULL
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(check_in)
        .bind(status)
        .bind(location)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    /// Record a check-out with the derived hours; status from check-in is
    /// left untouched
    pub async fn update_check_out(
        &self,
        user_id: i32,
        date: NaiveDate,
        check_out: NaiveTime,
        hours_worked: Decimal,
        overtime: Decimal,
    ) -> AppResult<AttendanceRecord> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            UPDATE attendance
            SET check_out = $3, hours_worked = $4, overtime = $5
            WHERE user_id = $1 AND date = $2
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(check_out)
        .bind(hours_worked)
        .bind(overtime)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    /// Upsert an absence for one user on one day
    pub async fn upsert_absent(
        &self,
        user_id: i32,
        date: NaiveDate,
        notes: &str,
    ) -> AppResult<AttendanceRecord> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance (user_id, date, status, hours_worked, overtime, notes)
            VALUES ($1, $2, 'absent', 0, 0, $3)
            ON CONFLICT (user_id, date) DO UPDATE
            SET status = EXCLUDED.status,
                hours_worked = EXCLUDED.hours_worked,
                overtime = EXCLUDED.overtime,
                notes = EXCLUDED.notes,
                check_in = NULL,
                check_out = NULL
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    /// List all records for one day
    pub async fn list_for_date(&self, date: NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT * FROM attendance WHERE date = $1 ORDER BY user_id",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// List records for one user within an optional date range
    pub async fn list_for_user(
        &self,
        user_id: i32,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<AttendanceRecord>> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT * FROM attendance
            WHERE user_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}
