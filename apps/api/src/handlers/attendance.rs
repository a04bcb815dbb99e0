use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use soramayo_core::UserIdentity;
use soramayo_domain::{AttendanceDay, NewEmployee};

use crate::dto::attendance::parse_employee_id;
use crate::dto::records::parse_fecha;
use crate::dto::{
    AttendanceDayRequest, AttendanceRecordResponse, EmployeeRequest, EmployeeResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_employees_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<EmployeeResponse>>> {
    let employees = state
        .attendance_service
        .list_employees(&user)
        .await?
        .into_iter()
        .map(EmployeeResponse::from)
        .collect();

    Ok(Json(employees))
}

pub async fn create_employee_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<EmployeeRequest>,
) -> ApiResult<(StatusCode, Json<EmployeeResponse>)> {
    let input = NewEmployee::try_from(payload)?;
    let employee = state.attendance_service.create_employee(&user, input).await?;

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(employee))))
}

pub async fn update_employee_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(employee_id): Path<String>,
    Json(payload): Json<EmployeeRequest>,
) -> ApiResult<Json<EmployeeResponse>> {
    let id = parse_employee_id(&employee_id)?;
    let input = NewEmployee::try_from(payload)?;
    let employee = state
        .attendance_service
        .update_employee(&user, id, input)
        .await?;

    Ok(Json(EmployeeResponse::from(employee)))
}

pub async fn remove_employee_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(employee_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_employee_id(&employee_id)?;
    state.attendance_service.remove_employee(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_attendance_day_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(fecha): Path<String>,
) -> ApiResult<Json<Vec<AttendanceRecordResponse>>> {
    let fecha = parse_fecha(&fecha)?;
    let records = state
        .attendance_service
        .list_day(&user, fecha)
        .await?
        .into_iter()
        .map(AttendanceRecordResponse::from)
        .collect();

    Ok(Json(records))
}

pub async fn save_attendance_day_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<AttendanceDayRequest>,
) -> ApiResult<StatusCode> {
    let day = AttendanceDay::try_from(payload)?;
    state.attendance_service.save_day(&user, day).await?;

    Ok(StatusCode::NO_CONTENT)
}
