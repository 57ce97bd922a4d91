//! Driver weekly-schedules repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::schedule::{DriverScheduleEntry, UpsertDriverSchedule},
};

#[derive(Clone)]
pub struct SchedulesRepository {
    pool: Pool<Postgres>,
}

impl SchedulesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List a driver's weekly schedule ordered by day
    pub async fn list_for_driver(&self, driver_id: i32) -> AppResult<Vec<DriverScheduleEntry>> {
        let entries = sqlx::query_as::<_, DriverScheduleEntry>(
            "SELECT * FROM driver_schedules WHERE driver_id = $1 ORDER BY day_of_week",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    /// Insert-or-update the entry keyed by (driver_id, day_of_week)
    pub async fn upsert_entry(
        &self,
        driver_id: i32,
        data: &UpsertDriverSchedule,
    ) -> AppResult<DriverScheduleEntry> {
        let now = Utc::now();
        let entry = sqlx::query_as::<_, DriverScheduleEntry>(
            r#"
            INSERT INTO driver_schedules (driver_id, day_of_week, available, trip_id, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (driver_id, day_of_week) DO UPDATE
            SET available = EXCLUDED.available,
                trip_id = EXCLUDED.trip_id,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(driver_id)
        .bind(data.day_of_week)
        .bind(data.available)
        .bind(data.trip_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(entry)
    }
}
