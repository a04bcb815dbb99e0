mod admin;
pub(crate) mod attendance;
mod auth;
pub(crate) mod common;
pub(crate) mod records;

pub use admin::{AssignRoleRequest, UserOverviewResponse};
pub use attendance::{
    AttendanceDayRequest, AttendanceEntryRequest, AttendanceRecordResponse, EmployeeRequest,
    EmployeeResponse,
};
pub use auth::{AuthLoginRequest, AuthLoginResponse, AuthRegisterRequest, SessionUserResponse};
pub use common::{DashboardSummaryResponse, GenericMessageResponse, HealthResponse};
pub use records::{FuelRecordRequest, FuelRecordResponse, MealRecordRequest, MealRecordResponse};

#[cfg(test)]
mod tests {
    use super::{
        AssignRoleRequest, AttendanceDayRequest, AttendanceEntryRequest, AttendanceRecordResponse,
        AuthLoginRequest, AuthLoginResponse, AuthRegisterRequest, DashboardSummaryResponse,
        EmployeeRequest, EmployeeResponse, FuelRecordRequest, FuelRecordResponse,
        GenericMessageResponse, HealthResponse, MealRecordRequest, MealRecordResponse,
        SessionUserResponse, UserOverviewResponse,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        AuthRegisterRequest::export(&config)?;
        AuthLoginRequest::export(&config)?;
        AuthLoginResponse::export(&config)?;
        SessionUserResponse::export(&config)?;
        FuelRecordRequest::export(&config)?;
        FuelRecordResponse::export(&config)?;
        MealRecordRequest::export(&config)?;
        MealRecordResponse::export(&config)?;
        EmployeeRequest::export(&config)?;
        EmployeeResponse::export(&config)?;
        AttendanceEntryRequest::export(&config)?;
        AttendanceDayRequest::export(&config)?;
        AttendanceRecordResponse::export(&config)?;
        AssignRoleRequest::export(&config)?;
        UserOverviewResponse::export(&config)?;
        DashboardSummaryResponse::export(&config)?;
        GenericMessageResponse::export(&config)?;
        HealthResponse::export(&config)?;
        ErrorResponse::export(&config)?;

        Ok(())
    }
}
