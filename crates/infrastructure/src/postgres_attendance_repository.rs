use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use soramayo_application::AttendanceRepository;
use soramayo_core::{AppError, AppResult, UserId};
use soramayo_domain::{AttendanceDay, AttendanceRecord, Employee, EmployeeId, NewEmployee};

/// PostgreSQL-backed repository for the employee roster and attendance rows.
///
/// Attendance rows carry a UNIQUE (empleado_id, fecha) constraint; `upsert_day`
/// rides that constraint with ON CONFLICT so re-submitting a day replaces the
/// previous batch. The conditional update only touches rows held by the
/// caller, so a zero-row statement means another account owns that day and
/// the whole batch rolls back. Employee removal flips `activo` instead of
/// deleting.
#[derive(Clone)]
pub struct PostgresAttendanceRepository {
    pool: PgPool,
}

impl PostgresAttendanceRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EmployeeRow {
    id: uuid::Uuid,
    nombre: String,
    apellido: String,
    dni: Option<String>,
    puesto: String,
    activo: bool,
    owner_id: uuid::Uuid,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: EmployeeId::from_uuid(row.id),
            nombre: row.nombre,
            apellido: row.apellido,
            dni: row.dni,
            puesto: row.puesto,
            activo: row.activo,
            owner_id: UserId::from_uuid(row.owner_id),
        }
    }
}

#[derive(Debug, FromRow)]
struct AttendanceRow {
    empleado_id: uuid::Uuid,
    fecha: NaiveDate,
    presente: bool,
    horas_extra: f64,
    observaciones: Option<String>,
    owner_id: uuid::Uuid,
    created_at: DateTime<Utc>,
}

impl From<AttendanceRow> for AttendanceRecord {
    fn from(row: AttendanceRow) -> Self {
        Self {
            empleado_id: EmployeeId::from_uuid(row.empleado_id),
            fecha: row.fecha,
            presente: row.presente,
            horas_extra: row.horas_extra,
            observaciones: row.observaciones,
            owner_id: UserId::from_uuid(row.owner_id),
            created_at: row.created_at,
        }
    }
}

const EMPLOYEE_COLUMNS: &str = "id, nombre, apellido, dni, puesto, activo, owner_id";

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepository {
    async fn list_active_employees(&self) -> AppResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM empleados \
             WHERE activo \
             ORDER BY apellido, nombre"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list employees: {error}")))?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn insert_employee(&self, owner_id: UserId, input: NewEmployee) -> AppResult<Employee> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "INSERT INTO empleados (nombre, apellido, dni, puesto, owner_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {EMPLOYEE_COLUMNS}"
        ))
        .bind(input.nombre.as_str())
        .bind(input.apellido.as_str())
        .bind(&input.dni)
        .bind(input.puesto.as_str())
        .bind(owner_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert employee: {error}")))?;

        Ok(Employee::from(row))
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        owner_id: UserId,
        input: NewEmployee,
    ) -> AppResult<Employee> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "UPDATE empleados \
             SET nombre = $3, apellido = $4, dni = $5, puesto = $6 \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {EMPLOYEE_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .bind(input.nombre.as_str())
        .bind(input.apellido.as_str())
        .bind(&input.dni)
        .bind(input.puesto.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update employee: {error}")))?;

        let Some(row) = row else {
            return Err(AppError::NotFound(format!("employee '{id}'")));
        };

        Ok(Employee::from(row))
    }

    async fn deactivate_employee(&self, id: EmployeeId, owner_id: UserId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE empleados
            SET activo = FALSE
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to deactivate employee: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("employee '{id}'")));
        }

        Ok(())
    }

    async fn list_for_date(&self, fecha: NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT a.empleado_id, a.fecha, a.presente, a.horas_extra,
                   a.observaciones, a.owner_id, a.created_at
            FROM asistencias a
            JOIN empleados e ON e.id = a.empleado_id
            WHERE a.fecha = $1
            ORDER BY e.apellido, e.nombre
            "#,
        )
        .bind(fecha)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list attendance: {error}")))?;

        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }

    async fn upsert_day(&self, owner_id: UserId, day: AttendanceDay) -> AppResult<()> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(|error| AppError::Internal(format!("failed to open transaction: {error}")))?;

        for entry in &day.entries {
            let result = sqlx::query(
                r#"
                INSERT INTO asistencias
                    (empleado_id, fecha, presente, horas_extra, observaciones, owner_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (empleado_id, fecha) DO UPDATE
                SET presente = EXCLUDED.presente,
                    horas_extra = EXCLUDED.horas_extra,
                    observaciones = EXCLUDED.observaciones
                WHERE asistencias.owner_id = EXCLUDED.owner_id
                "#,
            )
            .bind(entry.empleado_id.as_uuid())
            .bind(day.fecha)
            .bind(entry.presente)
            .bind(entry.horas_extra)
            .bind(&entry.observaciones)
            .bind(owner_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| match &error {
                sqlx::Error::Database(db_error) if db_error.is_foreign_key_violation() => {
                    AppError::NotFound(format!("employee '{}'", entry.empleado_id))
                }
                _ => AppError::Internal(format!("failed to upsert attendance row: {error}")),
            })?;

            // The conditional update skips a row held by another account;
            // dropping the transaction rolls the batch back.
            if result.rows_affected() == 0 {
                return Err(AppError::NotFound(format!(
                    "attendance for employee '{}' on {}",
                    entry.empleado_id, day.fecha
                )));
            }
        }

        transaction
            .commit()
            .await
            .map_err(|error| AppError::Internal(format!("failed to commit attendance: {error}")))
    }
}
