use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use soramayo_core::{AppResult, UserIdentity};

/// Aggregate figures for the combustible module.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FuelSummary {
    /// Number of fuel records.
    pub total_registros: i64,
    /// Gallons dispensed across all records.
    pub total_galones: f64,
    /// Total amount charged across all records.
    pub total_gastado: f64,
}

/// Aggregate figures for the alimentación module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MealSummary {
    /// Number of meal records.
    pub total_registros: i64,
    /// Persons served across all records.
    pub total_personas: i64,
}

/// Aggregate attendance figures for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttendanceSummary {
    /// Rows recorded for the day.
    pub total_registros: i64,
    /// Employees marked present.
    pub total_presentes: i64,
    /// Employees marked absent.
    pub total_ausentes: i64,
}

/// Combined dashboard payload.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashboardSummary {
    /// Fuel totals.
    pub combustible: FuelSummary,
    /// Catering totals.
    pub alimentacion: MealSummary,
    /// Attendance totals for the requested day.
    pub asistencia: AttendanceSummary,
}

/// Repository port for dashboard aggregates.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Computes fuel totals across all records.
    async fn fuel_summary(&self) -> AppResult<FuelSummary>;

    /// Computes catering totals across all records.
    async fn meal_summary(&self) -> AppResult<MealSummary>;

    /// Computes attendance totals for one day.
    async fn attendance_summary(&self, fecha: NaiveDate) -> AppResult<AttendanceSummary>;
}

/// Application service for the dashboard.
///
/// The dashboard is the one area every authenticated account may open,
/// roleless accounts included, so no matrix check happens here.
#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn DashboardRepository>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    #[must_use]
    pub fn new(repository: Arc<dyn DashboardRepository>) -> Self {
        Self { repository }
    }

    /// Builds the combined summary for the given day.
    pub async fn summary(
        &self,
        _actor: &UserIdentity,
        fecha: NaiveDate,
    ) -> AppResult<DashboardSummary> {
        Ok(DashboardSummary {
            combustible: self.repository.fuel_summary().await?,
            alimentacion: self.repository.meal_summary().await?,
            asistencia: self.repository.attendance_summary(fecha).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use soramayo_core::{AppResult, UserId, UserIdentity};

    use super::{
        AttendanceSummary, DashboardRepository, DashboardService, FuelSummary, MealSummary,
    };

    struct FakeDashboardRepository;

    #[async_trait]
    impl DashboardRepository for FakeDashboardRepository {
        async fn fuel_summary(&self) -> AppResult<FuelSummary> {
            Ok(FuelSummary {
                total_registros: 4,
                total_galones: 120.0,
                total_gastado: 430.0,
            })
        }

        async fn meal_summary(&self) -> AppResult<MealSummary> {
            Ok(MealSummary {
                total_registros: 2,
                total_personas: 36,
            })
        }

        async fn attendance_summary(&self, _fecha: NaiveDate) -> AppResult<AttendanceSummary> {
            Ok(AttendanceSummary {
                total_registros: 12,
                total_presentes: 10,
                total_ausentes: 2,
            })
        }
    }

    #[tokio::test]
    async fn summary_combines_every_module_even_for_roleless_accounts() {
        let service = DashboardService::new(Arc::new(FakeDashboardRepository));
        let roleless = UserIdentity::new(UserId::new(), "nuevo@soramayo.pe");

        let summary = service
            .summary(
                &roleless,
                NaiveDate::from_ymd_opt(2024, 6, 3).unwrap_or_default(),
            )
            .await;

        assert!(matches!(
            summary,
            Ok(value)
                if value.combustible.total_registros == 4
                    && value.alimentacion.total_personas == 36
                    && value.asistencia.total_ausentes == 2
        ));
    }
}
