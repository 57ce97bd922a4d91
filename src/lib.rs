//! Safari Operations Server
//!
//! Back-office server for a safari tourism operator, providing a REST JSON
//! API for trip/driver/vehicle assignment, staff attendance, and the
//! supporting bookings and notification records.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
