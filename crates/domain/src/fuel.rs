//! Fuel consumption records (combustible).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use soramayo_core::{AppError, AppResult, NonEmptyString, UserId};
use uuid::Uuid;

/// Unique identifier for a fuel record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FuelRecordId(Uuid);

impl FuelRecordId {
    /// Creates a new random record identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a record identifier from an existing UUID value.
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

impl Default for FuelRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for FuelRecordId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Fuel types dispensed at the stations the consortium works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FuelType {
    /// Diesel.
    Petroleo,
    /// Regular gasoline.
    Gasolina,
    /// Premium gasoline.
    GasolinaPremium,
}

impl FuelType {
    /// Returns a stable storage value for this fuel type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Petroleo => "petroleo",
            Self::Gasolina => "gasolina",
            Self::GasolinaPremium => "gasolina-premium",
        }
    }
}

impl FromStr for FuelType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "petroleo" => Ok(Self::Petroleo),
            "gasolina" => Ok(Self::Gasolina),
            "gasolina-premium" => Ok(Self::GasolinaPremium),
            _ => Err(AppError::Validation(format!("unknown fuel type '{value}'"))),
        }
    }
}

/// Validated input for creating or replacing a fuel record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFuelRecord {
    /// Day the fuel was dispensed.
    pub fecha: NaiveDate,
    /// Kind of fuel.
    pub tipo_combustible: FuelType,
    /// Station the fuel was bought at.
    pub grifo: NonEmptyString,
    /// Gallons dispensed, strictly positive.
    pub cantidad_galones: f64,
    /// Amount charged in total, non-negative.
    pub total_cobrado: f64,
    /// Machine or vehicle the fuel went into.
    pub equipo: NonEmptyString,
    /// Free-form notes.
    pub observaciones: Option<String>,
}

impl NewFuelRecord {
    /// Validates the quantity and amount invariants.
    pub fn validate(&self) -> AppResult<()> {
        if !self.cantidad_galones.is_finite() || self.cantidad_galones <= 0.0 {
            return Err(AppError::Validation(
                "cantidad_galones must be greater than zero".to_owned(),
            ));
        }

        if !self.total_cobrado.is_finite() || self.total_cobrado < 0.0 {
            return Err(AppError::Validation(
                "total_cobrado must not be negative".to_owned(),
            ));
        }

        Ok(())
    }
}

/// A stored fuel record. The owner is fixed at creation and never reassigned.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelRecord {
    /// Stable record identifier.
    pub id: FuelRecordId,
    /// Day the fuel was dispensed.
    pub fecha: NaiveDate,
    /// Kind of fuel.
    pub tipo_combustible: FuelType,
    /// Station the fuel was bought at.
    pub grifo: String,
    /// Gallons dispensed.
    pub cantidad_galones: f64,
    /// Amount charged in total.
    pub total_cobrado: f64,
    /// Machine or vehicle the fuel went into.
    pub equipo: String,
    /// Free-form notes.
    pub observaciones: Option<String>,
    /// Account that created the record.
    pub owner_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl FuelRecord {
    /// Derived unit price: total charged divided by gallons dispensed.
    ///
    /// Storage keeps this as a generated column; this accessor exists for
    /// summaries computed away from the database.
    #[must_use]
    pub fn precio_por_galon(&self) -> f64 {
        self.total_cobrado / self.cantidad_galones
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{NaiveDate, Utc};
    use soramayo_core::{NonEmptyString, UserId};

    use super::{FuelRecord, FuelRecordId, FuelType, NewFuelRecord};

    fn sample_input() -> NewFuelRecord {
        NewFuelRecord {
            fecha: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap_or_default(),
            tipo_combustible: FuelType::Petroleo,
            grifo: NonEmptyString::new("GRIFO D&J").unwrap_or_else(|_| panic!("test")),
            cantidad_galones: 10.0,
            total_cobrado: 35.0,
            equipo: NonEmptyString::new("Excavadora CAT 320").unwrap_or_else(|_| panic!("test")),
            observaciones: None,
        }
    }

    #[test]
    fn ten_gallons_for_35_yields_unit_price_of_3_50() {
        let input = sample_input();
        let record = FuelRecord {
            id: FuelRecordId::new(),
            fecha: input.fecha,
            tipo_combustible: input.tipo_combustible,
            grifo: input.grifo.as_str().to_owned(),
            cantidad_galones: input.cantidad_galones,
            total_cobrado: input.total_cobrado,
            equipo: input.equipo.as_str().to_owned(),
            observaciones: None,
            owner_id: UserId::new(),
            created_at: Utc::now(),
        };

        assert!((record.precio_por_galon() - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_gallons_is_rejected() {
        let mut input = sample_input();
        input.cantidad_galones = 0.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn negative_total_is_rejected() {
        let mut input = sample_input();
        input.total_cobrado = -1.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn fuel_type_roundtrip_storage_value() {
        for fuel_type in [
            FuelType::Petroleo,
            FuelType::Gasolina,
            FuelType::GasolinaPremium,
        ] {
            let restored = FuelType::from_str(fuel_type.as_str());
            assert!(matches!(restored, Ok(value) if value == fuel_type));
        }
    }

    #[test]
    fn unknown_fuel_type_is_rejected() {
        assert!(FuelType::from_str("diesel-b5").is_err());
    }
}
