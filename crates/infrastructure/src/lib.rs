//! Infrastructure adapters: PostgreSQL repositories and password hashing.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod postgres_attendance_repository;
mod postgres_catering_repository;
mod postgres_dashboard_repository;
mod postgres_fuel_repository;
mod postgres_role_repository;
mod postgres_user_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use postgres_attendance_repository::PostgresAttendanceRepository;
pub use postgres_catering_repository::PostgresCateringRepository;
pub use postgres_dashboard_repository::PostgresDashboardRepository;
pub use postgres_fuel_repository::PostgresFuelRepository;
pub use postgres_role_repository::PostgresRoleRepository;
pub use postgres_user_repository::PostgresUserRepository;
