use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for email/password registration.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/auth-register-request.ts"
)]
pub struct AuthRegisterRequest {
    pub email: String,
    pub password: String,
}

/// Incoming payload for email/password login.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/auth-login-request.ts"
)]
pub struct AuthLoginRequest {
    pub email: String,
    pub password: String,
}

/// Auth status response for the login flow.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/auth-login-response.ts"
)]
pub struct AuthLoginResponse {
    pub status: String,
}

/// API representation of the authenticated account.
///
/// `rol` is `null` for accounts an administrator has not assigned yet; such
/// accounts see only the dashboard in `modulos`.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/session-user-response.ts"
)]
pub struct SessionUserResponse {
    pub user_id: String,
    pub email: String,
    pub rol: Option<String>,
    pub modulos: Vec<String>,
}
