//! Drivers repository for database operations

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        driver::{Driver, DriverWithTrip},
        trip::TripSummary,
    },
};

#[derive(Clone)]
pub struct DriversRepository {
    pool: Pool<Postgres>,
}

impl DriversRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get driver by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Driver> {
        sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Driver with id {} not found", id)))
    }

    /// Resolve a driver's user id, if the driver exists
    pub async fn get_user_id(&self, driver_id: i32) -> AppResult<Option<i32>> {
        let user_id: Option<i32> =
            sqlx::query_scalar("SELECT user_id FROM drivers WHERE id = $1")
                .bind(driver_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user_id)
    }

    /// List every driver joined with their current in-progress trip (if any)
    /// and the plate of the vehicle tied to that trip
    pub async fn list_with_current_trip(&self) -> AppResult<Vec<DriverWithTrip>> {
        let rows = sqlx::query(
            r#"
            SELECT d.id, d.user_id, d.rating, d.experience, d.languages,
                   d.specialties, d.total_trips, d.average_rating,
                   d.on_time_percentage, d.next_available,
                   u.name,
                   t.id as trip_id, t.customer_name, t.package_name,
                   t.start_date, t.end_date,
                   v.plate as vehicle_plate
            FROM drivers d
            LEFT JOIN users u ON d.user_id = u.id
            LEFT JOIN trips t ON t.driver_id = d.id AND t.status = 'in_progress'
            LEFT JOIN vehicles v ON v.id = t.vehicle_id
            ORDER BY u.name, d.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::new();
        for row in rows {
            let trip_id: Option<i32> = row.get("trip_id");
            let current_trip = trip_id.map(|id| TripSummary {
                id,
                customer_name: row.get("customer_name"),
                package_name: row.get("package_name"),
                start_date: row.get("start_date"),
                end_date: row.get("end_date"),
            });

            result.push(DriverWithTrip {
                driver: Driver {
                    id: row.get("id"),
                    user_id: row.get("user_id"),
                    rating: row.get("rating"),
                    experience: row.get("experience"),
                    languages: row.get("languages"),
                    specialties: row.get("specialties"),
                    total_trips: row.get("total_trips"),
                    average_rating: row.get("average_rating"),
                    on_time_percentage: row.get("on_time_percentage"),
                    next_available: row.get("next_available"),
                },
                name: row.get("name"),
                current_trip,
                vehicle_plate: row.get("vehicle_plate"),
            });
        }

        Ok(result)
    }
}
