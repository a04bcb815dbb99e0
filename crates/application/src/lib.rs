//! Application services and ports for the Soramayo operations backend.

#![forbid(unsafe_code)]

mod access_service;
mod admin_service;
mod attendance_service;
mod catering_service;
mod dashboard_service;
mod fuel_service;
mod user_service;

pub use access_service::{AccessService, RoleRepository};
pub use admin_service::{AdminService, RoleAdminRepository, RoleAssignmentRecord, UserOverview};
pub use attendance_service::{AttendanceRepository, AttendanceService};
pub use catering_service::{CateringRepository, CateringService};
pub use dashboard_service::{
    AttendanceSummary, DashboardRepository, DashboardService, DashboardSummary, FuelSummary,
    MealSummary,
};
pub use fuel_service::{FuelRepository, FuelService};
pub use user_service::{
    AuthOutcome, DirectoryUser, PasswordHasher, UserRecord, UserRepository, UserService,
};
