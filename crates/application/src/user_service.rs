//! Account registration and authentication.
//!
//! Follows the OWASP authentication cheat sheet: Argon2id hashing behind a
//! port, generic failure messages so login never reveals whether an email
//! exists, and a password hash run even for unknown accounts to keep timing
//! uniform.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use soramayo_core::{AppError, AppResult, UserId};

/// Minimum password length (NIST SP800-63B without MFA).
pub const PASSWORD_MIN_LENGTH: usize = 10;

/// Maximum password length, protects Argon2id from pathological inputs.
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Account row returned by repository queries.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique account identifier.
    pub id: UserId,
    /// Canonical (lowercased) email address.
    pub email: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Directory projection of an account, for the admin module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    /// Unique account identifier.
    pub user_id: UserId,
    /// Canonical email address.
    pub email: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Repository port for account persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds an account by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;

    /// Finds an account by its identifier.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>>;

    /// Creates a new account. Returns the assigned identifier.
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<UserId>;

    /// Lists every account for the admin directory, oldest first.
    async fn list_directory(&self) -> AppResult<Vec<DirectoryUser>>;
}

/// Port for password hashing. Keeps the application crate free of direct
/// cryptographic coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Result of a login attempt.
#[derive(Debug)]
pub enum AuthOutcome {
    /// Authentication succeeded. A session can be established.
    Authenticated(UserRecord),
    /// Authentication failed. The message stays generic.
    Failed,
}

/// Application service for registration and login.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    /// Registers a new account. New accounts start roleless; an
    /// administrator grants access afterwards.
    pub async fn register(&self, email: &str, password: &str) -> AppResult<UserId> {
        let email = normalize_email(email)?;
        validate_password(password)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            // Hash anyway so the response time does not reveal the account.
            let _ = self.password_hasher.hash_password(password);
            return Err(AppError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        let password_hash = self.password_hasher.hash_password(password)?;
        self.repository.create(&email, &password_hash).await
    }

    /// Authenticates an account. Any failure yields `AuthOutcome::Failed`
    /// without distinguishing unknown email from wrong password.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthOutcome> {
        let Ok(email) = normalize_email(email) else {
            return Ok(AuthOutcome::Failed);
        };

        let Some(user) = self.repository.find_by_email(&email).await? else {
            let _ = self.password_hasher.hash_password(password);
            return Ok(AuthOutcome::Failed);
        };

        if self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            Ok(AuthOutcome::Authenticated(user))
        } else {
            Ok(AuthOutcome::Failed)
        }
    }
}

fn normalize_email(email: &str) -> AppResult<String> {
    let trimmed = email.trim().to_lowercase();

    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || trimmed.len() > 254 {
        return Err(AppError::Validation(
            "email address is not structurally valid".to_owned(),
        ));
    }

    Ok(trimmed)
}

fn validate_password(password: &str) -> AppResult<()> {
    let length = password.chars().count();

    if length < PASSWORD_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }

    if length > PASSWORD_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "password must not exceed {PASSWORD_MAX_LENGTH} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests_support {
    use async_trait::async_trait;
    use chrono::Utc;
    use soramayo_core::{AppResult, UserId};
    use tokio::sync::Mutex;

    use super::{DirectoryUser, UserRecord, UserRepository};

    /// In-memory account store shared by service tests across this crate.
    #[derive(Default)]
    pub(crate) struct FakeUserRepository {
        pub(crate) users: Mutex<Vec<UserRecord>>,
    }

    #[async_trait]
    impl UserRepository for FakeUserRepository {
        async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
            Ok(self
                .users
                .lock()
                .await
                .iter()
                .find(|user| user.email == email)
                .cloned())
        }

        async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
            Ok(self
                .users
                .lock()
                .await
                .iter()
                .find(|user| user.id == user_id)
                .cloned())
        }

        async fn create(&self, email: &str, password_hash: &str) -> AppResult<UserId> {
            let user_id = UserId::new();
            self.users.lock().await.push(UserRecord {
                id: user_id,
                email: email.to_owned(),
                password_hash: password_hash.to_owned(),
                created_at: Utc::now(),
            });
            Ok(user_id)
        }

        async fn list_directory(&self) -> AppResult<Vec<DirectoryUser>> {
            Ok(self
                .users
                .lock()
                .await
                .iter()
                .map(|user| DirectoryUser {
                    user_id: user.id,
                    email: user.email.clone(),
                    created_at: user.created_at,
                })
                .collect())
        }
    }
}
