//! Repository layer for database operations

pub mod attendance;
pub mod bookings;
pub mod drivers;
pub mod notifications;
pub mod schedules;
pub mod trips;
pub mod users;
pub mod vehicles;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub trips: trips::TripsRepository,
    pub drivers: drivers::DriversRepository,
    pub vehicles: vehicles::VehiclesRepository,
    pub bookings: bookings::BookingsRepository,
    pub attendance: attendance::AttendanceRepository,
    pub notifications: notifications::NotificationsRepository,
    pub schedules: schedules::SchedulesRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            trips: trips::TripsRepository::new(pool.clone()),
            drivers: drivers::DriversRepository::new(pool.clone()),
            vehicles: vehicles::VehiclesRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            attendance: attendance::AttendanceRepository::new(pool.clone()),
            notifications: notifications::NotificationsRepository::new(pool.clone()),
            schedules: schedules::SchedulesRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}
