use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use soramayo_core::{AppError, NonEmptyString};
use soramayo_domain::{FuelRecord, FuelType, MealRecord, MealType, NewFuelRecord, NewMealRecord};
use ts_rs::TS;

/// Incoming payload for creating or replacing a fuel record.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/fuel-record-request.ts"
)]
pub struct FuelRecordRequest {
    pub fecha: String,
    pub tipo_combustible: String,
    pub grifo: String,
    pub cantidad_galones: f64,
    pub total_cobrado: f64,
    pub equipo: String,
    pub observaciones: Option<String>,
}

impl TryFrom<FuelRecordRequest> for NewFuelRecord {
    type Error = AppError;

    fn try_from(request: FuelRecordRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            fecha: parse_fecha(&request.fecha)?,
            tipo_combustible: FuelType::from_str(&request.tipo_combustible)?,
            grifo: NonEmptyString::new(request.grifo)
                .map_err(|_| AppError::Validation("grifo must not be empty".to_owned()))?,
            cantidad_galones: request.cantidad_galones,
            total_cobrado: request.total_cobrado,
            equipo: NonEmptyString::new(request.equipo)
                .map_err(|_| AppError::Validation("equipo must not be empty".to_owned()))?,
            observaciones: request.observaciones,
        })
    }
}

/// API representation of one fuel record.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/fuel-record-response.ts"
)]
pub struct FuelRecordResponse {
    pub id: String,
    pub fecha: String,
    pub tipo_combustible: String,
    pub grifo: String,
    pub cantidad_galones: f64,
    pub total_cobrado: f64,
    /// Derived in storage as total_cobrado / cantidad_galones.
    pub precio_por_galon: f64,
    pub equipo: String,
    pub observaciones: Option<String>,
    pub owner_id: String,
    pub created_at: String,
}

impl From<FuelRecord> for FuelRecordResponse {
    fn from(record: FuelRecord) -> Self {
        let precio_por_galon = record.precio_por_galon();
        Self {
            id: record.id.to_string(),
            fecha: record.fecha.to_string(),
            tipo_combustible: record.tipo_combustible.as_str().to_owned(),
            grifo: record.grifo,
            cantidad_galones: record.cantidad_galones,
            total_cobrado: record.total_cobrado,
            precio_por_galon,
            equipo: record.equipo,
            observaciones: record.observaciones,
            owner_id: record.owner_id.to_string(),
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Incoming payload for creating or replacing a meal record.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/meal-record-request.ts"
)]
pub struct MealRecordRequest {
    pub fecha: String,
    pub empresa: String,
    pub tipo_comida: String,
    pub cantidad: i32,
    pub observaciones: Option<String>,
}

impl TryFrom<MealRecordRequest> for NewMealRecord {
    type Error = AppError;

    fn try_from(request: MealRecordRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            fecha: parse_fecha(&request.fecha)?,
            empresa: NonEmptyString::new(request.empresa)
                .map_err(|_| AppError::Validation("empresa must not be empty".to_owned()))?,
            tipo_comida: MealType::from_str(&request.tipo_comida)?,
            cantidad: request.cantidad,
            observaciones: request.observaciones,
        })
    }
}

/// API representation of one meal record.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/meal-record-response.ts"
)]
pub struct MealRecordResponse {
    pub id: String,
    pub fecha: String,
    pub empresa: String,
    pub tipo_comida: String,
    pub cantidad: i32,
    pub observaciones: Option<String>,
    pub owner_id: String,
    pub created_at: String,
}

impl From<MealRecord> for MealRecordResponse {
    fn from(record: MealRecord) -> Self {
        Self {
            id: record.id.to_string(),
            fecha: record.fecha.to_string(),
            empresa: record.empresa,
            tipo_comida: record.tipo_comida.as_str().to_owned(),
            cantidad: record.cantidad,
            observaciones: record.observaciones,
            owner_id: record.owner_id.to_string(),
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

pub(crate) fn parse_fecha(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::from_str(value)
        .map_err(|_| AppError::Validation(format!("invalid date '{value}', expected YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use soramayo_domain::FuelType;

    use super::{FuelRecordRequest, NewFuelRecord, parse_fecha};

    #[test]
    fn fuel_request_converts_to_domain_input() {
        let request = FuelRecordRequest {
            fecha: "2024-06-03".to_owned(),
            tipo_combustible: "gasolina-premium".to_owned(),
            grifo: "GRIFO D&J".to_owned(),
            cantidad_galones: 10.0,
            total_cobrado: 35.0,
            equipo: "Excavadora CAT 320".to_owned(),
            observaciones: None,
        };

        let input = NewFuelRecord::try_from(request);
        assert!(matches!(
            input,
            Ok(ref value) if value.tipo_combustible == FuelType::GasolinaPremium
        ));
    }

    #[test]
    fn unknown_fuel_type_is_rejected() {
        let request = FuelRecordRequest {
            fecha: "2024-06-03".to_owned(),
            tipo_combustible: "kerosene".to_owned(),
            grifo: "GRIFO D&J".to_owned(),
            cantidad_galones: 10.0,
            total_cobrado: 35.0,
            equipo: "Excavadora CAT 320".to_owned(),
            observaciones: None,
        };

        assert!(NewFuelRecord::try_from(request).is_err());
    }

    #[test]
    fn malformed_date_is_rejected() {
        assert!(parse_fecha("03/06/2024").is_err());
        assert!(parse_fecha("2024-06-03").is_ok());
    }
}
