use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use soramayo_core::{AppError, UserId, UserIdentity};
use soramayo_domain::Role;
use uuid::Uuid;

use crate::dto::{AssignRoleRequest, UserOverviewResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<UserOverviewResponse>>> {
    let users = state
        .admin_service
        .list_users(&user)
        .await?
        .into_iter()
        .map(UserOverviewResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn assign_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
    Json(payload): Json<AssignRoleRequest>,
) -> ApiResult<StatusCode> {
    let target = parse_user_id(&user_id)?;
    let role = Role::from_str(&payload.rol)?;
    state.admin_service.assign_role(&user, target, role).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
) -> ApiResult<StatusCode> {
    let target = parse_user_id(&user_id)?;
    state.admin_service.remove_role(&user, target).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_user_id(value: &str) -> Result<UserId, AppError> {
    Uuid::parse_str(value)
        .map(UserId::from_uuid)
        .map_err(|_| AppError::Validation(format!("invalid user id '{value}'")))
}
