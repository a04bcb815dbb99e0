//! Catering / meal service records (alimentación).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use soramayo_core::{AppError, AppResult, NonEmptyString, UserId};
use uuid::Uuid;

/// Unique identifier for a meal service record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MealRecordId(Uuid);

impl MealRecordId {
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

impl Default for MealRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MealRecordId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Meal services served at site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast.
    Desayuno,
    /// Lunch.
    Almuerzo,
    /// Dinner.
    Cena,
}

impl MealType {
    /// Returns a stable storage value for this meal type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desayuno => "desayuno",
            Self::Almuerzo => "almuerzo",
            Self::Cena => "cena",
        }
    }
}

impl FromStr for MealType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "desayuno" => Ok(Self::Desayuno),
            "almuerzo" => Ok(Self::Almuerzo),
            "cena" => Ok(Self::Cena),
            _ => Err(AppError::Validation(format!("unknown meal type '{value}'"))),
        }
    }
}

/// Validated input for creating or replacing a meal service record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMealRecord {
    /// Day of the meal service.
    pub fecha: NaiveDate,
    /// Company the meals were served for.
    pub empresa: NonEmptyString,
    /// Which meal was served.
    pub tipo_comida: MealType,
    /// Number of persons served, at least one.
    pub cantidad: i32,
    /// Free-form notes.
    pub observaciones: Option<String>,
}

impl NewMealRecord {
    /// Validates the head-count invariant.
    pub fn validate(&self) -> AppResult<()> {
        if self.cantidad < 1 {
            return Err(AppError::Validation(
                "cantidad must be at least one person".to_owned(),
            ));
        }

        Ok(())
    }
}

/// A stored meal service record. The owner is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct MealRecord {
    /// Stable record identifier.
    pub id: MealRecordId,
    /// Day of the meal service.
    pub fecha: NaiveDate,
    /// Company the meals were served for.
    pub empresa: String,
    /// Which meal was served.
    pub tipo_comida: MealType,
    /// Number of persons served.
    pub cantidad: i32,
    /// Free-form notes.
    pub observaciones: Option<String>,
    /// Account that created the record.
    pub owner_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;
    use soramayo_core::NonEmptyString;

    use super::{MealType, NewMealRecord};

    #[test]
    fn zero_persons_is_rejected() {
        let input = NewMealRecord {
            fecha: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap_or_default(),
            empresa: NonEmptyString::new("Consorcio Soramayo").unwrap_or_else(|_| panic!("test")),
            tipo_comida: MealType::Almuerzo,
            cantidad: 0,
            observaciones: None,
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn meal_type_roundtrip_storage_value() {
        for meal_type in [MealType::Desayuno, MealType::Almuerzo, MealType::Cena] {
            let restored = MealType::from_str(meal_type.as_str());
            assert!(matches!(restored, Ok(value) if value == meal_type));
        }
    }

    #[test]
    fn unknown_meal_type_is_rejected() {
        assert!(MealType::from_str("merienda").is_err());
    }
}
