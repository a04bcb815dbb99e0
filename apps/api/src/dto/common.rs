use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ready: bool,
    pub postgres: HealthDependencyStatus,
}

/// One runtime dependency health status.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-dependency-status.ts"
)]
pub struct HealthDependencyStatus {
    pub status: &'static str,
    pub detail: Option<String>,
}

/// Generic message response for auth flows.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/generic-message-response.ts"
)]
pub struct GenericMessageResponse {
    pub message: String,
}

/// Combined dashboard totals for the landing page cards.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/dashboard-summary-response.ts"
)]
pub struct DashboardSummaryResponse {
    pub combustible: FuelSummaryResponse,
    pub alimentacion: MealSummaryResponse,
    pub asistencia: AttendanceSummaryResponse,
}

/// Fuel totals across all records.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/fuel-summary-response.ts"
)]
pub struct FuelSummaryResponse {
    pub total_registros: i64,
    pub total_galones: f64,
    pub total_gastado: f64,
}

/// Catering totals across all records.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/meal-summary-response.ts"
)]
pub struct MealSummaryResponse {
    pub total_registros: i64,
    pub total_personas: i64,
}

/// Attendance totals for the requested day.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/attendance-summary-response.ts"
)]
pub struct AttendanceSummaryResponse {
    pub total_registros: i64,
    pub total_presentes: i64,
    pub total_ausentes: i64,
}

impl From<soramayo_application::DashboardSummary> for DashboardSummaryResponse {
    fn from(summary: soramayo_application::DashboardSummary) -> Self {
        Self {
            combustible: FuelSummaryResponse {
                total_registros: summary.combustible.total_registros,
                total_galones: summary.combustible.total_galones,
                total_gastado: summary.combustible.total_gastado,
            },
            alimentacion: MealSummaryResponse {
                total_registros: summary.alimentacion.total_registros,
                total_personas: summary.alimentacion.total_personas,
            },
            asistencia: AttendanceSummaryResponse {
                total_registros: summary.asistencia.total_registros,
                total_presentes: summary.asistencia.total_presentes,
                total_ausentes: summary.asistencia.total_ausentes,
            },
        }
    }
}
