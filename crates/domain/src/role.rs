//! The closed set of roles an account can hold.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use soramayo_core::AppError;

/// Access levels assignable to an account, at most one per account.
///
/// The set is closed. An account without an assignment has no role at all,
/// which is a distinct state and never collapses into `Visor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to every module including user management.
    Admin,
    /// Warehouse operator: full access to the business modules.
    Almacen,
    /// Read-only viewer.
    Visor,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Almacen => "almacen",
            Self::Visor => "visor",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::Admin, Role::Almacen, Role::Visor];

        ALL
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "almacen" => Ok(Self::Almacen),
            "visor" => Ok(Self::Visor),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}
