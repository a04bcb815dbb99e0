use std::sync::Arc;

use async_trait::async_trait;
use soramayo_core::{AppResult, UserId, UserIdentity};
use soramayo_domain::{Action, MealRecord, MealRecordId, Module, NewMealRecord};

use crate::AccessService;

/// Repository port for meal service persistence. Mutations are owner-scoped
/// in storage, same contract as the fuel repository.
#[async_trait]
pub trait CateringRepository: Send + Sync {
    /// Lists all meal records, newest first (fecha desc, created_at desc).
    async fn list(&self) -> AppResult<Vec<MealRecord>>;

    /// Inserts a record owned by `owner_id`.
    async fn insert(&self, owner_id: UserId, input: NewMealRecord) -> AppResult<MealRecord>;

    /// Replaces an owned record. `NotFound` when no row matches id + owner.
    async fn update(
        &self,
        id: MealRecordId,
        owner_id: UserId,
        input: NewMealRecord,
    ) -> AppResult<MealRecord>;

    /// Deletes an owned record. `NotFound` when no row matches id + owner.
    async fn delete(&self, id: MealRecordId, owner_id: UserId) -> AppResult<()>;
}

/// Application service for the alimentación module.
#[derive(Clone)]
pub struct CateringService {
    access_service: AccessService,
    repository: Arc<dyn CateringRepository>,
}

impl CateringService {
    /// Creates a new catering service.
    #[must_use]
    pub fn new(access_service: AccessService, repository: Arc<dyn CateringRepository>) -> Self {
        Self {
            access_service,
            repository,
        }
    }

    /// Lists all meal records for viewers of the module.
    pub async fn list_records(&self, actor: &UserIdentity) -> AppResult<Vec<MealRecord>> {
        self.access_service
            .require_capability(actor, Module::Alimentacion, Action::Ver)
            .await?;

        self.repository.list().await
    }

    /// Creates a meal record owned by the caller.
    pub async fn create_record(
        &self,
        actor: &UserIdentity,
        input: NewMealRecord,
    ) -> AppResult<MealRecord> {
        self.access_service
            .require_capability(actor, Module::Alimentacion, Action::Crear)
            .await?;
        input.validate()?;

        self.repository.insert(actor.user_id(), input).await
    }

    /// Replaces a meal record the caller owns.
    pub async fn update_record(
        &self,
        actor: &UserIdentity,
        id: MealRecordId,
        input: NewMealRecord,
    ) -> AppResult<MealRecord> {
        self.access_service
            .require_capability(actor, Module::Alimentacion, Action::Editar)
            .await?;
        input.validate()?;

        self.repository.update(id, actor.user_id(), input).await
    }

    /// Deletes a meal record the caller owns.
    pub async fn delete_record(&self, actor: &UserIdentity, id: MealRecordId) -> AppResult<()> {
        self.access_service
            .require_capability(actor, Module::Alimentacion, Action::Eliminar)
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
    use soramayo_domain::{MealRecord, MealRecordId, MealType, NewMealRecord, Role};
    use tokio::sync::Mutex;

    use crate::access_service::tests_support::service_with_roles;

    use super::{CateringRepository, CateringService};

    #[derive(Default)]
    struct FakeCateringRepository {
        records: Mutex<Vec<MealRecord>>,
    }

    #[async_trait]
    impl CateringRepository for FakeCateringRepository {
        async fn list(&self) -> AppResult<Vec<MealRecord>> {
            Ok(self.records.lock().await.clone())
        }

        async fn insert(&self, owner_id: UserId, input: NewMealRecord) -> AppResult<MealRecord> {
            let record = MealRecord {
                id: MealRecordId::new(),
                fecha: input.fecha,
                empresa: input.empresa.as_str().to_owned(),
                tipo_comida: input.tipo_comida,
                cantidad: input.cantidad,
                observaciones: input.observaciones,
                owner_id,
                created_at: Utc::now(),
            };
            self.records.lock().await.push(record.clone());
            Ok(record)
        }

        async fn update(
            &self,
            id: MealRecordId,
            owner_id: UserId,
            input: NewMealRecord,
        ) -> AppResult<MealRecord> {
            let mut records = self.records.lock().await;
            let Some(stored) = records
                .iter_mut()
                .find(|record| record.id == id && record.owner_id == owner_id)
            else {
                return Err(AppError::NotFound(format!("meal record '{id}'")));
            };

            stored.fecha = input.fecha;
            stored.empresa = input.empresa.as_str().to_owned();
            stored.tipo_comida = input.tipo_comida;
            stored.cantidad = input.cantidad;
            stored.observaciones = input.observaciones;
            Ok(stored.clone())
        }

        async fn delete(&self, id: MealRecordId, owner_id: UserId) -> AppResult<()> {
            let mut records = self.records.lock().await;
            let before = records.len();
            records.retain(|record| !(record.id == id && record.owner_id == owner_id));

            if records.len() == before {
                return Err(AppError::NotFound(format!("meal record '{id}'")));
            }

            Ok(())
        }
    }

    fn sample_input() -> NewMealRecord {
        NewMealRecord {
            fecha: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap_or_default(),
            empresa: NonEmptyString::new("Gallegos Subcontrata").unwrap_or_else(|_| panic!("test")),
            tipo_comida: MealType::Almuerzo,
            cantidad: 18,
            observaciones: None,
        }
    }

    #[tokio::test]
    async fn visor_lists_but_cannot_create() {
        let actor = UserIdentity::new(UserId::new(), "visor@soramayo.pe");
        let access_service = service_with_roles(HashMap::from([(actor.user_id(), Role::Visor)]));
        let service = CateringService::new(access_service, Arc::new(FakeCateringRepository::default()));

        assert!(service.list_records(&actor).await.is_ok());
        let denied = service.create_record(&actor, sample_input()).await;
        assert!(matches!(denied, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn update_by_non_owner_is_rejected() {
        let owner = UserIdentity::new(UserId::new(), "owner@soramayo.pe");
        let other = UserIdentity::new(UserId::new(), "other@soramayo.pe");
        let access_service = service_with_roles(HashMap::from([
            (owner.user_id(), Role::Almacen),
            (other.user_id(), Role::Almacen),
        ]));
        let service =
            CateringService::new(access_service, Arc::new(FakeCateringRepository::default()));

        let created = service
            .create_record(&owner, sample_input())
            .await
            .unwrap_or_else(|_| panic!("test"));

        let result = service.update_record(&other, created.id, sample_input()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn zero_headcount_is_rejected_before_storage() {
        let actor = UserIdentity::new(UserId::new(), "almacen@soramayo.pe");
        let access_service = service_with_roles(HashMap::from([(actor.user_id(), Role::Almacen)]));
        let repository = Arc::new(FakeCateringRepository::default());
        let service = CateringService::new(access_service, repository.clone());

        let mut input = sample_input();
        input.cantidad = 0;
        let result = service.create_record(&actor, input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(repository.records.lock().await.is_empty());
    }
}
