pub mod admin;
pub mod attendance;
pub mod catering;
pub mod dashboard;
pub mod fuel;
pub mod health;
