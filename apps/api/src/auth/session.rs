use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use soramayo_core::{AppError, UserIdentity};
use tower_sessions::Session;

use crate::dto::SessionUserResponse;
use crate::error::ApiResult;
use crate::state::AppState;

use super::SESSION_USER_KEY;

/// POST /auth/logout - Destroy the current session.
pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me - Return the authenticated account, its role, and the modules
/// it may open. Roleless accounts get `rol: null` and only the dashboard.
pub async fn me_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<SessionUserResponse>> {
    let identity = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    let role = state.access_service.resolve_role(&identity).await;
    let modules = state.access_service.accessible_modules(&identity).await;

    Ok(Json(SessionUserResponse {
        user_id: identity.user_id().to_string(),
        email: identity.email().to_owned(),
        rol: role.map(|value| value.as_str().to_owned()),
        modulos: modules
            .into_iter()
            .map(|module| module.as_str().to_owned())
            .collect(),
    }))
}
