//! Vehicles repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{enums::VehicleStatus, vehicle::Vehicle},
};

#[derive(Clone)]
pub struct VehiclesRepository {
    pool: Pool<Postgres>,
}

impl VehiclesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all vehicles ordered by plate
    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY plate")
            .fetch_all(&self.pool)
            .await?;
        Ok(vehicles)
    }

    /// Set a vehicle's status (e.g. into or out of maintenance)
    pub async fn update_status(&self, id: i32, status: VehicleStatus) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle with id {} not found", id)))
    }
}
