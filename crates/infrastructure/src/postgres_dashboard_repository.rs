use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use soramayo_application::{AttendanceSummary, DashboardRepository, FuelSummary, MealSummary};
use soramayo_core::{AppError, AppResult};

/// PostgreSQL-backed aggregate queries for the dashboard.
#[derive(Clone)]
pub struct PostgresDashboardRepository {
    pool: PgPool,
}

impl PostgresDashboardRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FuelSummaryRow {
    total_registros: i64,
    total_galones: f64,
    total_gastado: f64,
}

#[derive(Debug, FromRow)]
struct MealSummaryRow {
    total_registros: i64,
    total_personas: i64,
}

#[derive(Debug, FromRow)]
struct AttendanceSummaryRow {
    total_registros: i64,
    total_presentes: i64,
    total_ausentes: i64,
}

#[async_trait]
impl DashboardRepository for PostgresDashboardRepository {
    async fn fuel_summary(&self) -> AppResult<FuelSummary> {
        let row = sqlx::query_as::<_, FuelSummaryRow>(
            r#"
            SELECT COUNT(*) AS total_registros,
                   COALESCE(SUM(cantidad_galones), 0)::DOUBLE PRECISION AS total_galones,
                   COALESCE(SUM(total_cobrado), 0)::DOUBLE PRECISION AS total_gastado
            FROM combustible_registros
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to summarize fuel: {error}")))?;

        Ok(FuelSummary {
            total_registros: row.total_registros,
            total_galones: row.total_galones,
            total_gastado: row.total_gastado,
        })
    }

    async fn meal_summary(&self) -> AppResult<MealSummary> {
        let row = sqlx::query_as::<_, MealSummaryRow>(
            r#"
            SELECT COUNT(*) AS total_registros,
                   COALESCE(SUM(cantidad), 0)::BIGINT AS total_personas
            FROM alimentacion_registros
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to summarize meals: {error}")))?;

        Ok(MealSummary {
            total_registros: row.total_registros,
            total_personas: row.total_personas,
        })
    }

    async fn attendance_summary(&self, fecha: NaiveDate) -> AppResult<AttendanceSummary> {
        let row = sqlx::query_as::<_, AttendanceSummaryRow>(
            r#"
            SELECT COUNT(*) AS total_registros,
                   COUNT(*) FILTER (WHERE presente) AS total_presentes,
                   COUNT(*) FILTER (WHERE NOT presente) AS total_ausentes
            FROM asistencias
            WHERE fecha = $1
            "#,
        )
        .bind(fecha)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to summarize attendance: {error}")))?;

        Ok(AttendanceSummary {
            total_registros: row.total_registros,
            total_presentes: row.total_presentes,
            total_ausentes: row.total_ausentes,
        })
    }
}
