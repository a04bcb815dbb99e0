use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use soramayo_application::AuthOutcome;
use soramayo_core::{AppError, UserIdentity};
use tower_sessions::Session;

use crate::dto::{
    AuthLoginRequest as LoginRequest, AuthLoginResponse as LoginResponse,
    AuthRegisterRequest as RegisterRequest, GenericMessageResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::{SESSION_CREATED_AT_KEY, SESSION_USER_KEY};

/// POST /auth/register - Create a new account with email+password.
///
/// New accounts start roleless; an administrator assigns a role afterwards.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<GenericMessageResponse>)> {
    state
        .user_service
        .register(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(GenericMessageResponse {
            message: "account created, sign in to continue".to_owned(),
        }),
    ))
}

/// POST /auth/login - Authenticate with email+password.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let outcome = state
        .user_service
        .login(&payload.email, &payload.password)
        .await?;

    match outcome {
        AuthOutcome::Authenticated(user) => {
            let identity = UserIdentity::new(user.id, user.email);

            // Regenerate the session id on privilege change.
            session.cycle_id().await.map_err(|error| {
                AppError::Internal(format!("failed to cycle session id: {error}"))
            })?;

            session
                .insert(SESSION_USER_KEY, &identity)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to persist session identity: {error}"))
                })?;

            session
                .insert(SESSION_CREATED_AT_KEY, chrono::Utc::now().timestamp())
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to persist session creation time: {error}"))
                })?;

            Ok(Json(LoginResponse {
                status: "authenticated".to_owned(),
            }))
        }
        // Generic error message for all failure cases.
        AuthOutcome::Failed => {
            Err(AppError::Unauthorized("invalid email or password".to_owned()).into())
        }
    }
}
