//! Safari Operations Server
//!
//! REST API server for the safari tourism back office.

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use safari_ops_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            format!("safari_ops_server={},tower_http=debug", config.logging.level).into()
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Safari Operations Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(
        repository,
        config.auth.clone(),
        config.attendance.clone(),
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // Operations (assignment engine)
        .route("/operations/overview", get(api::operations::overview))
        .route("/operations/trips/active", get(api::operations::list_active_trips))
        .route("/operations/trips/pending", get(api::operations::list_pending_trips))
        .route("/operations/trips/:id/status", put(api::operations::update_trip_status))
        .route("/operations/drivers", get(api::operations::list_drivers))
        .route("/operations/drivers/:id/schedule", get(api::operations::list_driver_schedule))
        .route("/operations/drivers/:id/schedule", put(api::operations::update_driver_schedule))
        .route("/operations/assign", post(api::operations::assign_trip))
        // Trip tables
        .route("/trips", get(api::trips::list_trips))
        .route("/trips/:id", get(api::trips::get_trip))
        // Fleet
        .route("/vehicles", get(api::vehicles::list_vehicles))
        .route("/vehicles/:id/status", put(api::vehicles::update_vehicle_status))
        // Attendance
        .route("/attendance/check-in", post(api::attendance::check_in))
        .route("/attendance/check-out", post(api::attendance::check_out))
        .route("/attendance/absent", post(api::attendance::mark_absent))
        .route("/attendance/users/:id", get(api::attendance::list_for_user))
        .route("/attendance/:date", get(api::attendance::list_for_date))
        // Notifications
        .route("/notifications", get(api::notifications::list_notifications))
        .route("/notifications/:id/read", post(api::notifications::mark_read))
        // Users
        .route("/users", get(api::users::list_users))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
