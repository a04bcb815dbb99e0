use std::sync::Arc;

use async_trait::async_trait;
use soramayo_core::{AppResult, UserId, UserIdentity};
use soramayo_domain::{Action, FuelRecord, FuelRecordId, Module, NewFuelRecord};

use crate::AccessService;

/// Repository port for fuel record persistence.
///
/// Every mutating operation is scoped by the owning account in storage; a
/// non-owner's update or delete affects zero rows and surfaces as `NotFound`
/// regardless of what the caller's UI allowed.
#[async_trait]
pub trait FuelRepository: Send + Sync {
    /// Lists all fuel records, newest first (fecha desc, created_at desc).
    async fn list(&self) -> AppResult<Vec<FuelRecord>>;

    /// Inserts a record owned by `owner_id`.
    async fn insert(
        &self,
        owner_id: UserId,
        input: NewFuelRecord,
    ) -> AppResult<FuelRecord>;

    /// Replaces an owned record. `NotFound` when no row matches id + owner.
    async fn update(
        &self,
        id: FuelRecordId,
        owner_id: UserId,
        input: NewFuelRecord,
    ) -> AppResult<FuelRecord>;

    /// Deletes an owned record. `NotFound` when no row matches id + owner.
    async fn delete(&self, id: FuelRecordId, owner_id: UserId) -> AppResult<()>;
}

/// Application service for the combustible module.
#[derive(Clone)]
pub struct FuelService {
    access_service: AccessService,
    repository: Arc<dyn FuelRepository>,
}

impl FuelService {
    /// Creates a new fuel service.
    #[must_use]
    pub fn new(access_service: AccessService, repository: Arc<dyn FuelRepository>) -> Self {
        Self {
            access_service,
            repository,
        }
    }

    /// Lists all fuel records for viewers of the module.
    pub async fn list_records(&self, actor: &UserIdentity) -> AppResult<Vec<FuelRecord>> {
        self.access_service
            .require_capability(actor, Module::Combustible, Action::Ver)
            .await?;

        self.repository.list().await
    }

    /// Creates a fuel record owned by the caller.
    pub async fn create_record(
        &self,
        actor: &UserIdentity,
        input: NewFuelRecord,
    ) -> AppResult<FuelRecord> {
        self.access_service
            .require_capability(actor, Module::Combustible, Action::Crear)
            .await?;
        input.validate()?;

        self.repository.insert(actor.user_id(), input).await
    }

    /// Replaces a fuel record the caller owns.
    pub async fn update_record(
        &self,
        actor: &UserIdentity,
        id: FuelRecordId,
        input: NewFuelRecord,
    ) -> AppResult<FuelRecord> {
        self.access_service
            .require_capability(actor, Module::Combustible, Action::Editar)
            .await?;
        input.validate()?;

        self.repository.update(id, actor.user_id(), input).await
    }

    /// Deletes a fuel record the caller owns.
    pub async fn delete_record(&self, actor: &UserIdentity, id: FuelRecordId) -> AppResult<()> {
        self.access_service
            .require_capability(actor, Module::Combustible, Action::Eliminar)
            .await?;

        self.repository.delete(id, actor.user_id()).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use soramayo_core::{AppError, AppResult, NonEmptyString, UserId, UserIdentity};
    use soramayo_domain::{FuelRecord, FuelRecordId, FuelType, NewFuelRecord, Role};
    use tokio::sync::Mutex;

    use crate::access_service::tests_support::service_with_roles;

    use super::{FuelRepository, FuelService};

    #[derive(Default)]
    struct FakeFuelRepository {
        records: Mutex<Vec<FuelRecord>>,
    }

    fn materialize(id: FuelRecordId, owner_id: UserId, input: NewFuelRecord) -> FuelRecord {
        FuelRecord {
            id,
            fecha: input.fecha,
            tipo_combustible: input.tipo_combustible,
            grifo: input.grifo.as_str().to_owned(),
            cantidad_galones: input.cantidad_galones,
            total_cobrado: input.total_cobrado,
            equipo: input.equipo.as_str().to_owned(),
            observaciones: input.observaciones,
            owner_id,
            created_at: Utc::now(),
        }
    }

    #[async_trait]
    impl FuelRepository for FakeFuelRepository {
        async fn list(&self) -> AppResult<Vec<FuelRecord>> {
            Ok(self.records.lock().await.clone())
        }

        async fn insert(&self, owner_id: UserId, input: NewFuelRecord) -> AppResult<FuelRecord> {
            let record = materialize(FuelRecordId::new(), owner_id, input);
            self.records.lock().await.push(record.clone());
            Ok(record)
        }

        async fn update(
            &self,
            id: FuelRecordId,
            owner_id: UserId,
            input: NewFuelRecord,
        ) -> AppResult<FuelRecord> {
            let mut records = self.records.lock().await;
            let Some(stored) = records
                .iter_mut()
                .find(|record| record.id == id && record.owner_id == owner_id)
            else {
                return Err(AppError::NotFound(format!("fuel record '{id}'")));
            };

            *stored = materialize(id, owner_id, input);
            Ok(stored.clone())
        }

        async fn delete(&self, id: FuelRecordId, owner_id: UserId) -> AppResult<()> {
            let mut records = self.records.lock().await;
            let before = records.len();
            records.retain(|record| !(record.id == id && record.owner_id == owner_id));

            if records.len() == before {
                return Err(AppError::NotFound(format!("fuel record '{id}'")));
            }

            Ok(())
        }
    }

    fn sample_input() -> NewFuelRecord {
        NewFuelRecord {
            fecha: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap_or_default(),
            tipo_combustible: FuelType::Gasolina,
            grifo: NonEmptyString::new("GRIFO D&J").unwrap_or_else(|_| panic!("test")),
            cantidad_galones: 12.5,
            total_cobrado: 50.0,
            equipo: NonEmptyString::new("Volquete FM-440").unwrap_or_else(|_| panic!("test")),
            observaciones: None,
        }
    }

    fn service_for(actor: &UserIdentity, role: Role) -> (FuelService, Arc<FakeFuelRepository>) {
        let repository = Arc::new(FakeFuelRepository::default());
        let access_service = service_with_roles(HashMap::from([(actor.user_id(), role)]));
        (
            FuelService::new(access_service, repository.clone()),
            repository,
        )
    }

    #[tokio::test]
    async fn visor_cannot_create_records() {
        let actor = UserIdentity::new(UserId::new(), "visor@soramayo.pe");
        let (service, _) = service_for(&actor, Role::Visor);

        let result = service.create_record(&actor, sample_input()).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn almacen_creates_and_lists_records() {
        let actor = UserIdentity::new(UserId::new(), "almacen@soramayo.pe");
        let (service, _) = service_for(&actor, Role::Almacen);

        let created = service.create_record(&actor, sample_input()).await;
        assert!(created.is_ok());

        let listed = service.list_records(&actor).await;
        assert!(matches!(listed, Ok(records) if records.len() == 1));
    }

    #[tokio::test]
    async fn update_by_non_owner_is_rejected_despite_capability() {
        let owner = UserIdentity::new(UserId::new(), "owner@soramayo.pe");
        let repository = Arc::new(FakeFuelRepository::default());
        let other = UserIdentity::new(UserId::new(), "other@soramayo.pe");
        let access_service = service_with_roles(HashMap::from([
            (owner.user_id(), Role::Almacen),
            (other.user_id(), Role::Almacen),
        ]));
        let service = FuelService::new(access_service, repository.clone());

        let created = service
            .create_record(&owner, sample_input())
            .await
            .unwrap_or_else(|_| panic!("test"));

        let result = service.update_record(&other, created.id, sample_input()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_rejected() {
        let owner = UserIdentity::new(UserId::new(), "owner@soramayo.pe");
        let other = UserIdentity::new(UserId::new(), "other@soramayo.pe");
        let repository = Arc::new(FakeFuelRepository::default());
        let access_service = service_with_roles(HashMap::from([
            (owner.user_id(), Role::Admin),
            (other.user_id(), Role::Admin),
        ]));
        let service = FuelService::new(access_service, repository.clone());

        let created = service
            .create_record(&owner, sample_input())
            .await
            .unwrap_or_else(|_| panic!("test"));

        let result = service.delete_record(&other, created.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(repository.records.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn invalid_quantity_is_rejected_before_storage() {
        let actor = UserIdentity::new(UserId::new(), "almacen@soramayo.pe");
        let (service, repository) = service_for(&actor, Role::Almacen);

        let mut input = sample_input();
        input.cantidad_galones = 0.0;
        let result = service.create_record(&actor, input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(repository.records.lock().await.is_empty());
    }
}
