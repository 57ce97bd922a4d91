//! Business logic services

pub mod assignment;
pub mod attendance;
pub mod auth;
pub mod notifications;

use crate::{
    config::{AttendanceConfig, AuthConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub assignment: assignment::AssignmentService,
    pub attendance: attendance::AttendanceService,
    pub notifications: notifications::NotificationsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        attendance_config: AttendanceConfig,
    ) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            assignment: assignment::AssignmentService::new(repository.clone()),
            attendance: attendance::AttendanceService::new(repository.clone(), attendance_config),
            notifications: notifications::NotificationsService::new(repository),
        }
    }
}
