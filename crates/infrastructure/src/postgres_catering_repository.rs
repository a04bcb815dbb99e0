use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use soramayo_application::CateringRepository;
use soramayo_core::{AppError, AppResult, UserId};
use soramayo_domain::{MealRecord, MealRecordId, MealType, NewMealRecord};

/// PostgreSQL-backed repository for meal service records.
#[derive(Clone)]
pub struct PostgresCateringRepository {
    pool: PgPool,
}

impl PostgresCateringRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MealRow {
    id: uuid::Uuid,
    fecha: NaiveDate,
    empresa: String,
    tipo_comida: String,
    cantidad: i32,
    observaciones: Option<String>,
    owner_id: uuid::Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<MealRow> for MealRecord {
    type Error = AppError;

    fn try_from(row: MealRow) -> Result<Self, Self::Error> {
        let tipo_comida = MealType::from_str(&row.tipo_comida).map_err(|_| {
            AppError::Internal(format!(
                "stored meal type '{}' is not recognized",
                row.tipo_comida
            ))
        })?;

        Ok(Self {
            id: MealRecordId::from_uuid(row.id),
            fecha: row.fecha,
            empresa: row.empresa,
            tipo_comida,
            cantidad: row.cantidad,
            observaciones: row.observaciones,
            owner_id: UserId::from_uuid(row.owner_id),
            created_at: row.created_at,
        })
    }
}

const MEAL_COLUMNS: &str =
    "id, fecha, empresa, tipo_comida, cantidad, observaciones, owner_id, created_at";

#[async_trait]
impl CateringRepository for PostgresCateringRepository {
    async fn list(&self) -> AppResult<Vec<MealRecord>> {
        let rows = sqlx::query_as::<_, MealRow>(&format!(
            "SELECT {MEAL_COLUMNS} FROM alimentacion_registros \
             ORDER BY fecha DESC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list meal records: {error}")))?;

        rows.into_iter().map(MealRecord::try_from).collect()
    }

    async fn insert(&self, owner_id: UserId, input: NewMealRecord) -> AppResult<MealRecord> {
        let row = sqlx::query_as::<_, MealRow>(&format!(
            "INSERT INTO alimentacion_registros \
             (fecha, empresa, tipo_comida, cantidad, observaciones, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {MEAL_COLUMNS}"
        ))
        .bind(input.fecha)
        .bind(input.empresa.as_str())
        .bind(input.tipo_comida.as_str())
        .bind(input.cantidad)
        .bind(&input.observaciones)
        .bind(owner_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert meal record: {error}")))?;

        MealRecord::try_from(row)
    }

    async fn update(
        &self,
        id: MealRecordId,
        owner_id: UserId,
        input: NewMealRecord,
    ) -> AppResult<MealRecord> {
        let row = sqlx::query_as::<_, MealRow>(&format!(
            "UPDATE alimentacion_registros \
             SET fecha = $3, empresa = $4, tipo_comida = $5, cantidad = $6, observaciones = $7 \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {MEAL_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .bind(input.fecha)
        .bind(input.empresa.as_str())
        .bind(input.tipo_comida.as_str())
        .bind(input.cantidad)
        .bind(&input.observaciones)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update meal record: {error}")))?;

        let Some(row) = row else {
            return Err(AppError::NotFound(format!("meal record '{id}'")));
        };

        MealRecord::try_from(row)
    }

    async fn delete(&self, id: MealRecordId, owner_id: UserId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM alimentacion_registros
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete meal record: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("meal record '{id}'")));
        }

        Ok(())
    }
}
