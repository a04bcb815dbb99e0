use axum::Json;
use axum::extract::{Extension, Query, State};
use serde::Deserialize;
use soramayo_core::UserIdentity;

use crate::dto::DashboardSummaryResponse;
use crate::dto::records::parse_fecha;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    fecha: Option<String>,
}

/// GET /api/dashboard - Combined totals. Defaults to today's attendance when
/// no `fecha` query parameter is given.
pub async fn dashboard_summary_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardSummaryResponse>> {
    let fecha = match query.fecha {
        Some(value) => parse_fecha(&value)?,
        None => chrono::Utc::now().date_naive(),
    };

    let summary = state.dashboard_service.summary(&user, fecha).await?;
    Ok(Json(DashboardSummaryResponse::from(summary)))
}
