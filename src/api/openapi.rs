//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{attendance, auth, health, notifications, operations, trips, users, vehicles};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Safari Operations API",
        version = "0.1.0",
        description = "Safari tourism operations back-office REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Operations
        operations::list_active_trips,
        operations::list_drivers,
        operations::list_pending_trips,
        operations::assign_trip,
        operations::update_trip_status,
        operations::overview,
        operations::list_driver_schedule,
        operations::update_driver_schedule,
        // Trips
        trips::list_trips,
        trips::get_trip,
        // Fleet
        vehicles::list_vehicles,
        vehicles::update_vehicle_status,
        // Attendance
        attendance::check_in,
        attendance::check_out,
        attendance::mark_absent,
        attendance::list_for_date,
        attendance::list_for_user,
        // Notifications
        notifications::list_notifications,
        notifications::mark_read,
        // Users
        users::list_users,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            crate::models::user::User,
            crate::models::user::Role,
            crate::models::user::Permission,
            // Trips
            crate::models::trip::Trip,
            crate::models::trip::ActiveTrip,
            crate::models::trip::PendingTrip,
            crate::models::trip::TripSummary,
            crate::models::trip::AssignTripRequest,
            crate::models::trip::UpdateTripStatus,
            // Drivers
            crate::models::driver::Driver,
            crate::models::driver::DriverOverview,
            crate::models::schedule::DriverScheduleEntry,
            crate::models::schedule::UpsertDriverSchedule,
            // Fleet
            crate::models::vehicle::Vehicle,
            crate::models::vehicle::UpdateVehicleStatus,
            // Attendance
            crate::models::attendance::AttendanceRecord,
            crate::models::attendance::CheckInRequest,
            crate::models::attendance::CheckOutRequest,
            crate::models::attendance::MarkAbsentRequest,
            // Notifications
            crate::models::notification::Notification,
            crate::models::notification::NewNotification,
            // Stats
            crate::models::stats::OperationsStats,
            crate::models::stats::OperationsOverview,
            // Enums
            crate::models::enums::TripStatus,
            crate::models::enums::TripPriority,
            crate::models::enums::DriverStatus,
            crate::models::enums::VehicleStatus,
            crate::models::enums::AttendanceStatus,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "operations", description = "Trip/driver/vehicle assignment"),
        (name = "trips", description = "Trip tables"),
        (name = "fleet", description = "Vehicle fleet"),
        (name = "attendance", description = "Staff attendance"),
        (name = "notifications", description = "Staff notifications"),
        (name = "users", description = "Staff roster")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
