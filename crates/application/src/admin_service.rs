use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use soramayo_core::{AppError, AppResult, UserId, UserIdentity};
use soramayo_domain::{Module, Role};

use crate::{AccessService, UserRepository};

/// One role assignment row: at most one per account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignmentRecord {
    /// Account the role is assigned to.
    pub user_id: UserId,
    /// The assigned role.
    pub role: Role,
    /// When the assignment was last written.
    pub assigned_at: DateTime<Utc>,
}

/// Administrative projection of one account with its current role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOverview {
    /// Stable account identifier.
    pub user_id: UserId,
    /// Account email address.
    pub email: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Current role, `None` for roleless accounts.
    pub role: Option<Role>,
}

/// Repository port for role assignment administration.
#[async_trait]
pub trait RoleAdminRepository: Send + Sync {
    /// Lists every current role assignment.
    async fn list_assignments(&self) -> AppResult<Vec<RoleAssignmentRecord>>;

    /// Writes an account's role in one atomic upsert keyed by the account,
    /// so two concurrent administrators cannot produce a duplicate row.
    async fn upsert_assignment(&self, user_id: UserId, role: Role) -> AppResult<()>;

    /// Removes an account's assignment, leaving it roleless.
    async fn remove_assignment(&self, user_id: UserId) -> AppResult<()>;
}

/// Application service for the gestión de usuarios module.
#[derive(Clone)]
pub struct AdminService {
    access_service: AccessService,
    repository: Arc<dyn RoleAdminRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl AdminService {
    /// Creates a new admin service.
    #[must_use]
    pub fn new(
        access_service: AccessService,
        repository: Arc<dyn RoleAdminRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            access_service,
            repository,
            user_repository,
        }
    }

    /// Lists every account with its current role for administrators.
    pub async fn list_users(&self, actor: &UserIdentity) -> AppResult<Vec<UserOverview>> {
        self.access_service
            .require_module(actor, Module::GestionUsuarios)
            .await?;

        let assignments: HashMap<UserId, Role> = self
            .repository
            .list_assignments()
            .await?
            .into_iter()
            .map(|assignment| (assignment.user_id, assignment.role))
            .collect();

        let users = self
            .user_repository
            .list_directory()
            .await?
            .into_iter()
            .map(|user| UserOverview {
                role: assignments.get(&user.user_id).copied(),
                user_id: user.user_id,
                email: user.email,
                created_at: user.created_at,
            })
            .collect();

        Ok(users)
    }

    /// Assigns or replaces an account's role. `NotFound` when no account
    /// carries the given id.
    pub async fn assign_role(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        role: Role,
    ) -> AppResult<()> {
        self.access_service
            .require_module(actor, Module::GestionUsuarios)
            .await?;

        if self.user_repository.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("account '{user_id}'")));
        }

        self.repository.upsert_assignment(user_id, role).await
    }

    /// Removes an account's role, leaving it roleless.
    pub async fn remove_role(&self, actor: &UserIdentity, user_id: UserId) -> AppResult<()> {
        self.access_service
            .require_module(actor, Module::GestionUsuarios)
            .await?;

        self.repository.remove_assignment(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use soramayo_core::{AppError, AppResult, UserId, UserIdentity};
    use soramayo_domain::Role;
    use tokio::sync::Mutex;

    use crate::access_service::tests_support::service_with_roles;
    use crate::user_service::tests_support::FakeUserRepository;

    use super::{AdminService, RoleAdminRepository, RoleAssignmentRecord};

    #[derive(Default)]
    struct FakeRoleAdminRepository {
        assignments: Mutex<HashMap<UserId, Role>>,
    }

    #[async_trait]
    impl RoleAdminRepository for FakeRoleAdminRepository {
        async fn list_assignments(&self) -> AppResult<Vec<RoleAssignmentRecord>> {
            Ok(self
                .assignments
                .lock()
                .await
                .iter()
                .map(|(user_id, role)| RoleAssignmentRecord {
                    user_id: *user_id,
                    role: *role,
                    assigned_at: Utc::now(),
                })
                .collect())
        }

        async fn upsert_assignment(&self, user_id: UserId, role: Role) -> AppResult<()> {
            self.assignments.lock().await.insert(user_id, role);
            Ok(())
        }

        async fn remove_assignment(&self, user_id: UserId) -> AppResult<()> {
            self.assignments.lock().await.remove(&user_id);
            Ok(())
        }
    }

    fn admin_actor() -> UserIdentity {
        UserIdentity::new(UserId::new(), "admin@soramayo.pe")
    }

    fn service_for(
        actor: &UserIdentity,
        role: Role,
    ) -> (AdminService, Arc<FakeRoleAdminRepository>, Arc<FakeUserRepository>) {
        let repository = Arc::new(FakeRoleAdminRepository::default());
        let users = Arc::new(FakeUserRepository::default());
        let access_service = service_with_roles(HashMap::from([(actor.user_id(), role)]));
        let service = AdminService::new(access_service, repository.clone(), users.clone());
        (service, repository, users)
    }

    async fn registered_account(users: &FakeUserRepository, email: &str) -> UserId {
        use crate::UserRepository;

        users
            .create(email, "stored-hash")
            .await
            .unwrap_or_else(|_| panic!("test"))
    }

    #[tokio::test]
    async fn non_admin_cannot_assign_roles() {
        let actor = admin_actor();
        let (service, _, _) = service_for(&actor, Role::Almacen);

        let result = service.assign_role(&actor, UserId::new(), Role::Visor).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn reassignment_replaces_without_duplicating() {
        let actor = admin_actor();
        let (service, repository, users) = service_for(&actor, Role::Admin);
        let subject = registered_account(&users, "obrero@soramayo.pe").await;

        assert!(service.assign_role(&actor, subject, Role::Visor).await.is_ok());
        assert!(service.assign_role(&actor, subject, Role::Almacen).await.is_ok());

        let assignments = repository.assignments.lock().await;
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments.get(&subject), Some(&Role::Almacen));
    }

    #[tokio::test]
    async fn assigning_a_role_to_an_unknown_account_is_rejected() {
        let actor = admin_actor();
        let (service, repository, _) = service_for(&actor, Role::Admin);

        let result = service.assign_role(&actor, UserId::new(), Role::Visor).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(repository.assignments.lock().await.is_empty());
    }

    #[tokio::test]
    async fn removing_a_role_leaves_the_account_roleless() {
        let actor = admin_actor();
        let (service, repository, users) = service_for(&actor, Role::Admin);
        let subject = registered_account(&users, "obrero@soramayo.pe").await;

        assert!(service.assign_role(&actor, subject, Role::Visor).await.is_ok());
        assert!(service.remove_role(&actor, subject).await.is_ok());
        assert!(repository.assignments.lock().await.is_empty());
    }
}
