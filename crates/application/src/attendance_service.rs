use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use soramayo_core::{AppResult, UserId, UserIdentity};
use soramayo_domain::{
    Action, AttendanceDay, AttendanceRecord, Employee, EmployeeId, Module, NewEmployee,
};

use crate::AccessService;

/// Repository port for the employee roster and attendance rows.
///
/// Attendance writes are keyed by (empleado_id, fecha); the storage layer
/// upserts on that composite key so a re-submitted day overwrites instead of
/// duplicating. Employee removal flips the `activo` flag, never deletes.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Lists active employees ordered by apellido.
    async fn list_active_employees(&self) -> AppResult<Vec<Employee>>;

    /// Inserts an employee owned by `owner_id`.
    async fn insert_employee(&self, owner_id: UserId, input: NewEmployee) -> AppResult<Employee>;

    /// Updates an owned employee. `NotFound` when no row matches id + owner.
    async fn update_employee(
        &self,
        id: EmployeeId,
        owner_id: UserId,
        input: NewEmployee,
    ) -> AppResult<Employee>;

    /// Soft-deletes an owned employee by clearing the `activo` flag.
    async fn deactivate_employee(&self, id: EmployeeId, owner_id: UserId) -> AppResult<()>;

    /// Lists attendance rows recorded for one day.
    async fn list_for_date(&self, fecha: NaiveDate) -> AppResult<Vec<AttendanceRecord>>;

    /// Upserts one day's attendance batch on (empleado_id, fecha).
    ///
    /// `NotFound` when an entry names an unknown employee or when a stored
    /// row for the day belongs to another account; no entry of the batch is
    /// written in that case.
    async fn upsert_day(&self, owner_id: UserId, day: AttendanceDay) -> AppResult<()>;
}

/// Application service for the asistencia module.
#[derive(Clone)]
pub struct AttendanceService {
    access_service: AccessService,
    repository: Arc<dyn AttendanceRepository>,
}

impl AttendanceService {
    /// Creates a new attendance service.
    #[must_use]
    pub fn new(access_service: AccessService, repository: Arc<dyn AttendanceRepository>) -> Self {
        Self {
            access_service,
            repository,
        }
    }

    /// Lists the active roster for viewers of the module.
    pub async fn list_employees(&self, actor: &UserIdentity) -> AppResult<Vec<Employee>> {
        self.access_service
            .require_capability(actor, Module::Asistencia, Action::Ver)
            .await?;

        self.repository.list_active_employees().await
    }

    /// Adds an employee to the roster, owned by the caller.
    pub async fn create_employee(
        &self,
        actor: &UserIdentity,
        input: NewEmployee,
    ) -> AppResult<Employee> {
        self.access_service
            .require_capability(actor, Module::Asistencia, Action::Crear)
            .await?;

        self.repository.insert_employee(actor.user_id(), input).await
    }

    /// Updates an employee the caller owns.
    pub async fn update_employee(
        &self,
        actor: &UserIdentity,
        id: EmployeeId,
        input: NewEmployee,
    ) -> AppResult<Employee> {
        self.access_service
            .require_capability(actor, Module::Asistencia, Action::Editar)
            .await?;

        self.repository
            .update_employee(id, actor.user_id(), input)
            .await
    }

    /// Soft-deletes an employee the caller owns.
    pub async fn remove_employee(&self, actor: &UserIdentity, id: EmployeeId) -> AppResult<()> {
        self.access_service
            .require_capability(actor, Module::Asistencia, Action::Eliminar)
            .await?;

        self.repository.deactivate_employee(id, actor.user_id()).await
    }

    /// Lists attendance rows for one day.
    pub async fn list_day(
        &self,
        actor: &UserIdentity,
        fecha: NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>> {
        self.access_service
            .require_capability(actor, Module::Asistencia, Action::Ver)
            .await?;

        self.repository.list_for_date(fecha).await
    }

    /// Records one day's attendance. Idempotent per (empleado_id, fecha).
    pub async fn save_day(&self, actor: &UserIdentity, day: AttendanceDay) -> AppResult<()> {
        self.access_service
            .require_capability(actor, Module::Asistencia, Action::Crear)
            .await?;
        day.validate()?;

        self.repository.upsert_day(actor.user_id(), day).await
    }
}
