//! Session/role resolution and capability enforcement.
//!
//! An account's role lives in a single assignment row; absence of that row
//! means the account is roleless, which is a normal state and never defaults
//! to any named role. Resolution re-runs on every use, so an administrative
//! role change takes effect on the caller's next request.

use std::sync::Arc;

use async_trait::async_trait;
use soramayo_core::{AppError, AppResult, UserId, UserIdentity};
use soramayo_domain::{Action, Module, Role, capability, viewable_modules};
use tracing::warn;

/// Repository port for role assignment lookups.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Finds the role assigned to an account. `Ok(None)` when no assignment
    /// row exists; `Err` only for transport/backend failures.
    async fn find_role_for_user(&self, user_id: UserId) -> AppResult<Option<Role>>;
}

/// Application service resolving an identity to a role and enforcing the
/// permission matrix.
#[derive(Clone)]
pub struct AccessService {
    repository: Arc<dyn RoleRepository>,
}

impl AccessService {
    /// Creates a new access service from a role repository.
    #[must_use]
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    /// Resolves the caller's current role.
    ///
    /// A missing assignment row resolves to `None`. A backend failure is
    /// logged as a warning and also resolves to `None`, which denies every
    /// capability rather than failing the request outright.
    pub async fn resolve_role(&self, identity: &UserIdentity) -> Option<Role> {
        match self.repository.find_role_for_user(identity.user_id()).await {
            Ok(role) => role,
            Err(error) => {
                warn!(user_id = %identity.user_id(), %error, "role lookup failed; treating account as roleless");
                None
            }
        }
    }

    /// Returns whether the caller currently holds a capability.
    pub async fn has_capability(
        &self,
        identity: &UserIdentity,
        module: Module,
        action: Option<Action>,
    ) -> bool {
        capability(self.resolve_role(identity).await, module, action)
    }

    /// Ensures the caller holds a capability, failing with `Forbidden`.
    pub async fn require_capability(
        &self,
        identity: &UserIdentity,
        module: Module,
        action: Action,
    ) -> AppResult<()> {
        if self.has_capability(identity, module, Some(action)).await {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "account '{}' may not {} in module '{}'",
            identity.user_id(),
            action.as_str(),
            module.as_str()
        )))
    }

    /// Ensures the caller may open a whole-module area such as user
    /// management.
    pub async fn require_module(&self, identity: &UserIdentity, module: Module) -> AppResult<()> {
        if capability(self.resolve_role(identity).await, module, None) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "account '{}' may not open module '{}'",
            identity.user_id(),
            module.as_str()
        )))
    }

    /// Returns the modules the caller may navigate to.
    pub async fn accessible_modules(&self, identity: &UserIdentity) -> Vec<Module> {
        viewable_modules(self.resolve_role(identity).await)
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use soramayo_core::{AppError, AppResult, UserId};
    use soramayo_domain::Role;

    use super::{AccessService, RoleRepository};

    /// Fake role repository shared by service tests across this crate.
    pub(crate) struct FakeRoleRepository {
        pub(crate) assignments: HashMap<UserId, Role>,
        pub(crate) fail: bool,
    }

    #[async_trait]
    impl RoleRepository for FakeRoleRepository {
        async fn find_role_for_user(&self, user_id: UserId) -> AppResult<Option<Role>> {
            if self.fail {
                return Err(AppError::Internal("connection refused".to_owned()));
            }

            Ok(self.assignments.get(&user_id).copied())
        }
    }

    /// Builds an access service over a fixed assignment table.
    pub(crate) fn service_with_roles(assignments: HashMap<UserId, Role>) -> AccessService {
        AccessService::new(Arc::new(FakeRoleRepository {
            assignments,
            fail: false,
        }))
    }
}
