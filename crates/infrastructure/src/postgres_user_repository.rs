use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use soramayo_application::{DirectoryUser, UserRecord, UserRepository};
use soramayo_core::{AppError, AppResult, UserId};

/// PostgreSQL-backed repository for account persistence.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: uuid::Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct DirectoryRow {
    id: uuid::Uuid,
    email: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM usuarios
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load account by email: {error}")))?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM usuarios
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load account by id: {error}")))?;

        Ok(row.map(UserRecord::from))
    }

    async fn create(&self, email: &str, password_hash: &str) -> AppResult<UserId> {
        let id = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            INSERT INTO usuarios (email, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                AppError::Conflict("an account with this email already exists".to_owned())
            }
            _ => AppError::Internal(format!("failed to create account: {error}")),
        })?;

        Ok(UserId::from_uuid(id))
    }

    async fn list_directory(&self) -> AppResult<Vec<DirectoryUser>> {
        let rows = sqlx::query_as::<_, DirectoryRow>(
            r#"
            SELECT id, email, created_at
            FROM usuarios
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list accounts: {error}")))?;

        Ok(rows
            .into_iter()
            .map(|row| DirectoryUser {
                user_id: UserId::from_uuid(row.id),
                email: row.email,
                created_at: row.created_at,
            })
            .collect())
    }
}
