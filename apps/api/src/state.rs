use soramayo_application::{
    AccessService, AdminService, AttendanceService, CateringService, DashboardService, FuelService,
    UserService,
};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_service: AccessService,
    pub user_service: UserService,
    pub fuel_service: FuelService,
    pub catering_service: CateringService,
    pub attendance_service: AttendanceService,
    pub admin_service: AdminService,
    pub dashboard_service: DashboardService,
    pub postgres_pool: PgPool,
    pub frontend_url: String,
}
