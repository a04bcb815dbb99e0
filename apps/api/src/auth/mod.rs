mod password;
mod session;

pub use password::{login_handler, register_handler};
pub use session::{logout_handler, me_handler};

pub const SESSION_USER_KEY: &str = "user_identity";
/// Absolute session creation timestamp, recorded at login.
pub const SESSION_CREATED_AT_KEY: &str = "session_created_at";
