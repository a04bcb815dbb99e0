use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use soramayo_application::FuelRepository;
use soramayo_core::{AppError, AppResult, UserId};
use soramayo_domain::{FuelRecord, FuelRecordId, FuelType, NewFuelRecord};

/// PostgreSQL-backed repository for fuel records.
///
/// `update` and `delete` filter on `owner_id` in SQL; a non-owner's statement
/// matches zero rows and comes back as `NotFound`.
#[derive(Clone)]
pub struct PostgresFuelRepository {
    pool: PgPool,
}

impl PostgresFuelRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FuelRow {
    id: uuid::Uuid,
    fecha: NaiveDate,
    tipo_combustible: String,
    grifo: String,
    cantidad_galones: f64,
    total_cobrado: f64,
    equipo: String,
    observaciones: Option<String>,
    owner_id: uuid::Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<FuelRow> for FuelRecord {
    type Error = AppError;

    fn try_from(row: FuelRow) -> Result<Self, Self::Error> {
        let tipo_combustible = FuelType::from_str(&row.tipo_combustible).map_err(|_| {
            AppError::Internal(format!(
                "stored fuel type '{}' is not recognized",
                row.tipo_combustible
            ))
        })?;

        Ok(Self {
            id: FuelRecordId::from_uuid(row.id),
            fecha: row.fecha,
            tipo_combustible,
            grifo: row.grifo,
            cantidad_galones: row.cantidad_galones,
            total_cobrado: row.total_cobrado,
            equipo: row.equipo,
            observaciones: row.observaciones,
            owner_id: UserId::from_uuid(row.owner_id),
            created_at: row.created_at,
        })
    }
}

const FUEL_COLUMNS: &str = "id, fecha, tipo_combustible, grifo, cantidad_galones, \
     total_cobrado, equipo, observaciones, owner_id, created_at";

#[async_trait]
impl FuelRepository for PostgresFuelRepository {
    async fn list(&self) -> AppResult<Vec<FuelRecord>> {
        let rows = sqlx::query_as::<_, FuelRow>(&format!(
            "SELECT {FUEL_COLUMNS} FROM combustible_registros \
             ORDER BY fecha DESC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list fuel records: {error}")))?;

        rows.into_iter().map(FuelRecord::try_from).collect()
    }

    async fn insert(&self, owner_id: UserId, input: NewFuelRecord) -> AppResult<FuelRecord> {
        let row = sqlx::query_as::<_, FuelRow>(&format!(
            "INSERT INTO combustible_registros \
             (fecha, tipo_combustible, grifo, cantidad_galones, total_cobrado, \
              equipo, observaciones, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {FUEL_COLUMNS}"
        ))
        .bind(input.fecha)
        .bind(input.tipo_combustible.as_str())
        .bind(input.grifo.as_str())
        .bind(input.cantidad_galones)
        .bind(input.total_cobrado)
        .bind(input.equipo.as_str())
        .bind(&input.observaciones)
        .bind(owner_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert fuel record: {error}")))?;

        FuelRecord::try_from(row)
    }

    async fn update(
        &self,
        id: FuelRecordId,
        owner_id: UserId,
        input: NewFuelRecord,
    ) -> AppResult<FuelRecord> {
        let row = sqlx::query_as::<_, FuelRow>(&format!(
            "UPDATE combustible_registros \
             SET fecha = $3, tipo_combustible = $4, grifo = $5, cantidad_galones = $6, \
                 total_cobrado = $7, equipo = $8, observaciones = $9 \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {FUEL_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .bind(input.fecha)
        .bind(input.tipo_combustible.as_str())
        .bind(input.grifo.as_str())
        .bind(input.cantidad_galones)
        .bind(input.total_cobrado)
        .bind(input.equipo.as_str())
        .bind(&input.observaciones)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update fuel record: {error}")))?;

        let Some(row) = row else {
            return Err(AppError::NotFound(format!("fuel record '{id}'")));
        };

        FuelRecord::try_from(row)
    }

    async fn delete(&self, id: FuelRecordId, owner_id: UserId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM combustible_registros
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete fuel record: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("fuel record '{id}'")));
        }

        Ok(())
    }
}
