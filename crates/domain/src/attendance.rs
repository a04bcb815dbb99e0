//! Employee roster and attendance tracking (asistencia).

use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use soramayo_core::{AppError, AppResult, NonEmptyString, UserId};
use uuid::Uuid;

/// Unique identifier for an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    /// Creates a new random employee identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an employee identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for EmployeeId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated input for creating or updating an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    /// First name.
    pub nombre: NonEmptyString,
    /// Last name.
    pub apellido: NonEmptyString,
    /// National identity document, optional.
    pub dni: Option<String>,
    /// Job position.
    pub puesto: NonEmptyString,
}

/// A roster entry. Deletion is a soft-delete: the row stays, `activo` flips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Stable employee identifier.
    pub id: EmployeeId,
    /// First name.
    pub nombre: String,
    /// Last name.
    pub apellido: String,
    /// National identity document, optional.
    pub dni: Option<String>,
    /// Job position.
    pub puesto: String,
    /// Whether the employee is on the active roster.
    pub activo: bool,
    /// Account that created the roster entry.
    pub owner_id: UserId,
}

/// One employee's attendance for one day, keyed by (employee, date).
///
/// Writes are idempotent on that composite key: re-submitting the same day
/// overwrites the stored values instead of duplicating the row.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceEntry {
    /// Employee the entry belongs to.
    pub empleado_id: EmployeeId,
    /// Whether the employee was present.
    pub presente: bool,
    /// Overtime hours worked, non-negative.
    pub horas_extra: f64,
    /// Free-form notes.
    pub observaciones: Option<String>,
}

impl AttendanceEntry {
    /// Validates the overtime invariant.
    pub fn validate(&self) -> AppResult<()> {
        if !self.horas_extra.is_finite() || self.horas_extra < 0.0 {
            return Err(AppError::Validation(
                "horas_extra must not be negative".to_owned(),
            ));
        }

        Ok(())
    }
}

/// A batch of attendance entries submitted for a single date.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceDay {
    /// The day being recorded.
    pub fecha: NaiveDate,
    /// One entry per employee.
    pub entries: Vec<AttendanceEntry>,
}

impl AttendanceDay {
    /// Validates every entry and rejects duplicate employees in one batch.
    pub fn validate(&self) -> AppResult<()> {
        for entry in &self.entries {
            entry.validate()?;
        }

        let mut seen = std::collections::HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.empleado_id) {
                return Err(AppError::Validation(format!(
                    "duplicate attendance entry for employee '{}'",
                    entry.empleado_id
                )));
            }
        }

        Ok(())
    }
}

/// A stored attendance row as read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    /// Employee the row belongs to.
    pub empleado_id: EmployeeId,
    /// The recorded day.
    pub fecha: NaiveDate,
    /// Whether the employee was present.
    pub presente: bool,
    /// Overtime hours worked.
    pub horas_extra: f64,
    /// Free-form notes.
    pub observaciones: Option<String>,
    /// Account that recorded the row.
    pub owner_id: UserId,
    /// Creation timestamp of the row.
    pub created_at: DateTime<Utc>,
}
