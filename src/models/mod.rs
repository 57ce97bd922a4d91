//! Domain models and API DTOs

pub mod attendance;
pub mod driver;
pub mod enums;
pub mod notification;
pub mod schedule;
pub mod stats;
pub mod trip;
pub mod user;
pub mod vehicle;
