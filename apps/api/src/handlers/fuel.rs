use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use soramayo_core::{AppError, UserIdentity};
use soramayo_domain::{FuelRecordId, NewFuelRecord};
use uuid::Uuid;

use crate::dto::{FuelRecordRequest, FuelRecordResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_fuel_records_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<FuelRecordResponse>>> {
    let records = state
        .fuel_service
        .list_records(&user)
        .await?
        .into_iter()
        .map(FuelRecordResponse::from)
        .collect();

    Ok(Json(records))
}

pub async fn create_fuel_record_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<FuelRecordRequest>,
) -> ApiResult<(StatusCode, Json<FuelRecordResponse>)> {
    let input = NewFuelRecord::try_from(payload)?;
    let record = state.fuel_service.create_record(&user, input).await?;

    Ok((StatusCode::CREATED, Json(FuelRecordResponse::from(record))))
}

pub async fn update_fuel_record_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(record_id): Path<String>,
    Json(payload): Json<FuelRecordRequest>,
) -> ApiResult<Json<FuelRecordResponse>> {
    let id = parse_record_id(&record_id)?;
    let input = NewFuelRecord::try_from(payload)?;
    let record = state.fuel_service.update_record(&user, id, input).await?;

    Ok(Json(FuelRecordResponse::from(record)))
}

pub async fn delete_fuel_record_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(record_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_record_id(&record_id)?;
    state.fuel_service.delete_record(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_record_id(value: &str) -> Result<FuelRecordId, AppError> {
    Uuid::parse_str(value)
        .map(FuelRecordId::from_uuid)
        .map_err(|_| AppError::Validation(format!("invalid fuel record id '{value}'")))
}
