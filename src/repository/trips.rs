//! Trips repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::VehicleStatus,
        trip::{ActiveTrip, Trip, UpdateTripStatus},
    },
};

/// Sentinel location shown while a trip has no recorded position
const IN_TRANSIT: &str = "In transit";

#[derive(Clone)]
pub struct TripsRepository {
    pool: Pool<Postgres>,
}

impl TripsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get trip by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Trip> {
        sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Trip with id {} not found", id)))
    }

    /// List all trips, most recently created first
    pub async fn list(&self) -> AppResult<Vec<Trip>> {
        let trips = sqlx::query_as::<_, Trip>("SELECT * FROM trips ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(trips)
    }

    /// List in-progress trips with driver name and vehicle plate resolved,
    /// most recently created first
    pub async fn list_active(&self) -> AppResult<Vec<ActiveTrip>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.customer_name, t.package_name, t.start_date, t.end_date,
                   t.status, t.progress, t.current_location, t.next_stop,
                   t.estimated_arrival, t.guests, t.driver_id, t.vehicle_id,
                   u.name as driver_name, v.plate as vehicle_plate
            FROM trips t
            LEFT JOIN drivers d ON t.driver_id = d.id
            LEFT JOIN users u ON d.user_id = u.id
            LEFT JOIN vehicles v ON t.vehicle_id = v.id
            WHERE t.status = 'in_progress'
            ORDER BY t.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::new();
        for row in rows {
            let current_location: Option<String> = row.get("current_location");
            result.push(ActiveTrip {
                id: row.get("id"),
                customer_name: row.get("customer_name"),
                package_name: row.get("package_name"),
                start_date: row.get("start_date"),
                end_date: row.get("end_date"),
                status: row.get("status"),
                progress: row.get("progress"),
                current_location: current_location.unwrap_or_else(|| IN_TRANSIT.to_string()),
                next_stop: row.get("next_stop"),
                estimated_arrival: row.get("estimated_arrival"),
                guests: row.get("guests"),
                driver_id: row.get("driver_id"),
                vehicle_id: row.get("vehicle_id"),
                driver_name: row.get("driver_name"),
                vehicle_plate: row.get("vehicle_plate"),
            });
        }

        Ok(result)
    }

    /// List trips awaiting assignment (scheduled, no driver), earliest
    /// departure first
    pub async fn list_pending(&self) -> AppResult<Vec<Trip>> {
        let trips = sqlx::query_as::<_, Trip>(
            r#"
            SELECT * FROM trips
            WHERE status = 'scheduled' AND driver_id IS NULL
            ORDER BY start_date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(trips)
    }

    /// Bind a driver and vehicle to a trip and transition it to in_progress.
    ///
    /// Both writes run in one transaction. The vehicle update is guarded by a
    /// compare-and-swap on `status = 'available'`; a concurrent assignment of
    /// the same vehicle rolls back with a Conflict error.
    pub async fn assign_resources(
        &self,
        trip_id: i32,
        driver_id: i32,
        vehicle_id: i32,
    ) -> AppResult<Trip> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let trip = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET driver_id = $2, vehicle_id = $3, status = 'in_progress', updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(trip_id)
        .bind(driver_id)
        .bind(vehicle_id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trip with id {} not found", trip_id)))?;

        let updated = sqlx::query(
            "UPDATE vehicles SET status = 'on_trip' WHERE id = $1 AND status = 'available'",
        )
        .bind(vehicle_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            let status: Option<VehicleStatus> =
                sqlx::query_scalar("SELECT status FROM vehicles WHERE id = $1")
                    .bind(vehicle_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            return match status {
                None => Err(AppError::NotFound(format!(
                    "Vehicle with id {} not found",
                    vehicle_id
                ))),
                Some(status) => Err(AppError::Conflict(format!(
                    "Vehicle {} is not available (status: {})",
                    vehicle_id, status
                ))),
            };
        }

        tx.commit().await?;
        Ok(trip)
    }

    /// Partial update of a trip's status, progress, and current location
    pub async fn update_status(&self, trip_id: i32, data: &UpdateTripStatus) -> AppResult<Trip> {
        let now = Utc::now();
        let mut sets = vec!["status = $2".to_string(), "updated_at = $3".to_string()];
        let mut idx = 4;

        if data.progress.is_some() {
            sets.push(format!("progress = ${}", idx));
            idx += 1;
        }
        if data.current_location.is_some() {
            sets.push(format!("current_location = ${}", idx));
        }

        let query = format!(
            "UPDATE trips SET {} WHERE id = $1 RETURNING *",
            sets.join(", ")
        );

        let mut builder = sqlx::query_as::<_, Trip>(&query)
            .bind(trip_id)
            .bind(data.status)
            .bind(now);
        if let Some(progress) = data.progress {
            builder = builder.bind(progress);
        }
        if let Some(ref location) = data.current_location {
            builder = builder.bind(location);
        }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Trip with id {} not found", trip_id)))
    }
}
