use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use soramayo_application::{RoleAdminRepository, RoleAssignmentRecord, RoleRepository};
use soramayo_core::{AppError, AppResult, UserId};
use soramayo_domain::Role;

/// PostgreSQL-backed repository for role assignments.
///
/// Serves both the per-request lookup port and the administrative port; the
/// `usuarios_roles` table holds at most one row per account.
#[derive(Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    user_id: uuid::Uuid,
    rol: String,
    assigned_at: DateTime<Utc>,
}

fn decode_role(value: &str) -> AppResult<Role> {
    Role::from_str(value)
        .map_err(|error| AppError::Internal(format!("failed to decode stored role: {error}")))
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_role_for_user(&self, user_id: UserId) -> AppResult<Option<Role>> {
        let value = sqlx::query_scalar::<_, String>(
            r#"
            SELECT rol
            FROM usuarios_roles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load role assignment: {error}")))?;

        value.as_deref().map(decode_role).transpose()
    }
}

#[async_trait]
impl RoleAdminRepository for PostgresRoleRepository {
    async fn list_assignments(&self) -> AppResult<Vec<RoleAssignmentRecord>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT user_id, rol, assigned_at
            FROM usuarios_roles
            ORDER BY assigned_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list role assignments: {error}")))?;

        rows.into_iter()
            .map(|row| {
                Ok(RoleAssignmentRecord {
                    user_id: UserId::from_uuid(row.user_id),
                    role: decode_role(row.rol.as_str())?,
                    assigned_at: row.assigned_at,
                })
            })
            .collect()
    }

    async fn upsert_assignment(&self, user_id: UserId, role: Role) -> AppResult<()> {
        // Single statement keyed by the account: concurrent admins cannot
        // produce a duplicate row or a lost insert.
        sqlx::query(
            r#"
            INSERT INTO usuarios_roles (user_id, rol, assigned_at)
            VALUES ($1, $2, now())
            ON CONFLICT (user_id) DO UPDATE
                SET rol = EXCLUDED.rol,
                    assigned_at = EXCLUDED.assigned_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| match &error {
            sqlx::Error::Database(db_error) if db_error.is_foreign_key_violation() => {
                AppError::NotFound(format!("account '{user_id}'"))
            }
            _ => AppError::Internal(format!("failed to upsert role assignment: {error}")),
        })?;

        Ok(())
    }

    async fn remove_assignment(&self, user_id: UserId) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM usuarios_roles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to remove role assignment: {error}")))?;

        Ok(())
    }
}
