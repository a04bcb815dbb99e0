use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use soramayo_core::{AppError, UserIdentity};
use soramayo_domain::{MealRecordId, NewMealRecord};
use uuid::Uuid;

use crate::dto::{MealRecordRequest, MealRecordResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_meal_records_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<MealRecordResponse>>> {
    let records = state
        .catering_service
        .list_records(&user)
        .await?
        .into_iter()
        .map(MealRecordResponse::from)
        .collect();

    Ok(Json(records))
}

pub async fn create_meal_record_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<MealRecordRequest>,
) -> ApiResult<(StatusCode, Json<MealRecordResponse>)> {
    let input = NewMealRecord::try_from(payload)?;
    let record = state.catering_service.create_record(&user, input).await?;

    Ok((StatusCode::CREATED, Json(MealRecordResponse::from(record))))
}

pub async fn update_meal_record_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(record_id): Path<String>,
    Json(payload): Json<MealRecordRequest>,
) -> ApiResult<Json<MealRecordResponse>> {
    let id = parse_record_id(&record_id)?;
    let input = NewMealRecord::try_from(payload)?;
    let record = state
        .catering_service
        .update_record(&user, id, input)
        .await?;

    Ok(Json(MealRecordResponse::from(record)))
}

pub async fn delete_meal_record_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(record_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_record_id(&record_id)?;
    state.catering_service.delete_record(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_record_id(value: &str) -> Result<MealRecordId, AppError> {
    Uuid::parse_str(value)
        .map(MealRecordId::from_uuid)
        .map_err(|_| AppError::Validation(format!("invalid meal record id '{value}'")))
}
