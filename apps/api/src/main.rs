//! Soramayo operations API composition root.

#![forbid(unsafe_code)]

mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use soramayo_application::{
    AccessService, AdminService, AttendanceService, CateringService, DashboardService, FuelService,
    UserService,
};
use soramayo_core::AppError;
use soramayo_infrastructure::{
    Argon2PasswordHasher, PostgresAttendanceRepository, PostgresCateringRepository,
    PostgresDashboardRepository, PostgresFuelRepository, PostgresRoleRepository,
    PostgresUserRepository,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

    let database_url = required_env("DATABASE_URL")?;
    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
    let session_secret = required_env("SESSION_SECRET")?;

    if session_secret.len() < 32 {
        return Err(AppError::Validation(
            "SESSION_SECRET must be at least 32 characters".to_owned(),
        ));
    }

    let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3001);

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .unwrap_or_else(|_| "false".to_owned())
        .eq_ignore_ascii_case("true");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let session_store = PostgresStore::new(pool.clone())
        .with_table_name("tower_sessions")
        .map_err(|error| {
            AppError::Validation(format!("invalid session table name configuration: {error}"))
        })?;
    session_store.migrate().await.map_err(|error| {
        AppError::Internal(format!("failed to initialize session store: {error}"))
    })?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)));

    let role_repository = Arc::new(PostgresRoleRepository::new(pool.clone()));
    let access_service = AccessService::new(role_repository.clone());

    let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
    let password_hasher = Arc::new(Argon2PasswordHasher::new());
    let user_service = UserService::new(user_repository.clone(), password_hasher);

    let fuel_service = FuelService::new(
        access_service.clone(),
        Arc::new(PostgresFuelRepository::new(pool.clone())),
    );
    let catering_service = CateringService::new(
        access_service.clone(),
        Arc::new(PostgresCateringRepository::new(pool.clone())),
    );
    let attendance_service = AttendanceService::new(
        access_service.clone(),
        Arc::new(PostgresAttendanceRepository::new(pool.clone())),
    );
    let admin_service = AdminService::new(access_service.clone(), role_repository, user_repository);
    let dashboard_service =
        DashboardService::new(Arc::new(PostgresDashboardRepository::new(pool.clone())));

    let app_state = AppState {
        access_service,
        user_service,
        fuel_service,
        catering_service,
        attendance_service,
        admin_service,
        dashboard_service,
        postgres_pool: pool,
        frontend_url: frontend_url.clone(),
    };

    let protected_routes = Router::new()
        .route("/api/dashboard", get(handlers::dashboard::dashboard_summary_handler))
        .route(
            "/api/combustible",
            get(handlers::fuel::list_fuel_records_handler)
                .post(handlers::fuel::create_fuel_record_handler),
        )
        .route(
            "/api/combustible/{record_id}",
            put(handlers::fuel::update_fuel_record_handler)
                .delete(handlers::fuel::delete_fuel_record_handler),
        )
        .route(
            "/api/alimentacion",
            get(handlers::catering::list_meal_records_handler)
                .post(handlers::catering::create_meal_record_handler),
        )
        .route(
            "/api/alimentacion/{record_id}",
            put(handlers::catering::update_meal_record_handler)
                .delete(handlers::catering::delete_meal_record_handler),
        )
        .route(
            "/api/asistencia/empleados",
            get(handlers::attendance::list_employees_handler)
                .post(handlers::attendance::create_employee_handler),
        )
        .route(
            "/api/asistencia/empleados/{employee_id}",
            put(handlers::attendance::update_employee_handler)
                .delete(handlers::attendance::remove_employee_handler),
        )
        .route(
            "/api/asistencia/dias",
            put(handlers::attendance::save_attendance_day_handler),
        )
        .route(
            "/api/asistencia/dias/{fecha}",
            get(handlers::attendance::list_attendance_day_handler),
        )
        .route(
            "/api/admin/usuarios",
            get(handlers::admin::list_users_handler),
        )
        .route(
            "/api/admin/usuarios/{user_id}/rol",
            put(handlers::admin::assign_role_handler).delete(handlers::admin::remove_role_handler),
        )
        .route("/auth/me", get(auth::me_handler))
        .route_layer(from_fn(middleware::require_auth));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state);

    let host = IpAddr::from_str(&api_host)
        .map_err(|error| AppError::Internal(format!("invalid API_HOST '{api_host}': {error}")))?;
    let address = SocketAddr::from((host, api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "soramayo-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
