//! The permission matrix: an immutable, process-wide mapping from role to
//! per-module capability flags, consulted before every guarded operation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use soramayo_core::AppError;

use crate::Role;

/// Application areas gated by the permission matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    /// Aggregate overview, reachable by every authenticated account.
    Dashboard,
    /// Fuel consumption records.
    Combustible,
    /// Catering / meal service records.
    Alimentacion,
    /// Employee attendance tracking.
    Asistencia,
    /// User and role administration.
    GestionUsuarios,
}

impl Module {
    /// Returns a stable transport value for this module.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Combustible => "combustible",
            Self::Alimentacion => "alimentacion",
            Self::Asistencia => "asistencia",
            Self::GestionUsuarios => "gestion_usuarios",
        }
    }

    /// Returns all modules in navigation order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Module] = &[
            Module::Dashboard,
            Module::Combustible,
            Module::Alimentacion,
            Module::Asistencia,
            Module::GestionUsuarios,
        ];

        ALL
    }
}

impl FromStr for Module {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dashboard" => Ok(Self::Dashboard),
            "combustible" => Ok(Self::Combustible),
            "alimentacion" => Ok(Self::Alimentacion),
            "asistencia" => Ok(Self::Asistencia),
            "gestion_usuarios" => Ok(Self::GestionUsuarios),
            _ => Err(AppError::Validation(format!("unknown module '{value}'"))),
        }
    }
}

/// Per-record actions within a business module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read records.
    Ver,
    /// Create new records.
    Crear,
    /// Modify owned records.
    Editar,
    /// Delete owned records.
    Eliminar,
}

impl Action {
    /// Returns a stable transport value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ver => "ver",
            Self::Crear => "crear",
            Self::Editar => "editar",
            Self::Eliminar => "eliminar",
        }
    }

    /// Returns all actions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Action] = &[Action::Ver, Action::Crear, Action::Editar, Action::Eliminar];

        ALL
    }
}

/// One module's entry in the matrix: either a whole-module switch or a
/// per-action record.
enum ModuleGrant {
    Whole(bool),
    PerAction {
        ver: bool,
        crear: bool,
        editar: bool,
        eliminar: bool,
    },
}

const FULL: ModuleGrant = ModuleGrant::PerAction {
    ver: true,
    crear: true,
    editar: true,
    eliminar: true,
};

const READ_ONLY: ModuleGrant = ModuleGrant::PerAction {
    ver: true,
    crear: false,
    editar: false,
    eliminar: false,
};

fn grant_for(role: Role, module: Module) -> ModuleGrant {
    match (role, module) {
        (_, Module::Dashboard) => ModuleGrant::Whole(true),
        (Role::Admin, Module::GestionUsuarios) => ModuleGrant::Whole(true),
        (Role::Almacen | Role::Visor, Module::GestionUsuarios) => ModuleGrant::Whole(false),
        (Role::Admin | Role::Almacen, _) => FULL,
        (Role::Visor, _) => READ_ONLY,
    }
}

/// Resolves a capability from the permission matrix.
///
/// Total and deterministic: a missing role denies everything; whole-module
/// entries ignore the action; a per-action entry consulted without an action
/// denies.
#[must_use]
pub fn capability(role: Option<Role>, module: Module, action: Option<Action>) -> bool {
    let Some(role) = role else {
        return false;
    };

    match grant_for(role, module) {
        ModuleGrant::Whole(allowed) => allowed,
        ModuleGrant::PerAction {
            ver,
            crear,
            editar,
            eliminar,
        } => match action {
            Some(Action::Ver) => ver,
            Some(Action::Crear) => crear,
            Some(Action::Editar) => editar,
            Some(Action::Eliminar) => eliminar,
            None => false,
        },
    }
}

/// Returns the modules an account may open, in navigation order.
///
/// The dashboard is reachable by every authenticated account, with or
/// without a role assignment.
#[must_use]
pub fn viewable_modules(role: Option<Role>) -> Vec<Module> {
    Module::all()
        .iter()
        .copied()
        .filter(|module| match module {
            Module::Dashboard => true,
            Module::GestionUsuarios => capability(role, *module, None),
            _ => capability(role, *module, Some(Action::Ver)),
        })
        .collect()
}
