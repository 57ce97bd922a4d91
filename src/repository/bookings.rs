//! Bookings repository for database operations

use sqlx::{Pool, Postgres};

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Mirror a trip assignment onto the owning booking for reporting.
    /// `driver_user_id` is the driver's user id, not the drivers-table id.
    pub async fn mirror_assignment(
        &self,
        booking_id: i32,
        driver_user_id: i32,
        vehicle_id: i32,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE bookings SET assigned_driver = $2, assigned_vehicle = $3 WHERE id = $1",
        )
        .bind(booking_id)
        .bind(driver_user_id)
        .bind(vehicle_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Booking with id {} not found",
                booking_id
            )));
        }
        Ok(())
    }
}
