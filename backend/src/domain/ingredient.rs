//! Ingredient reference data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by the ingredient constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientValidationError {
    EmptyName,
    NameTooLong { max: usize },
    EmptyMeasurementUnit,
}

impl fmt::Display for IngredientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "ingredient name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "ingredient name must be at most {max} characters")
            }
            Self::EmptyMeasurementUnit => write!(f, "measurement unit must not be empty"),
        }
    }
}

impl std::error::Error for IngredientValidationError {}

/// Stable ingredient identifier backed by a BIGSERIAL column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct IngredientId(i64);

impl IngredientId {
    /// Wrap a raw database identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum accepted ingredient name length.
pub const INGREDIENT_NAME_MAX: usize = 200;

/// Admin-curated ingredient row. Never deleted while a recipe links to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    #[schema(value_type = i64, example = 1)]
    id: IngredientId,
    #[schema(example = "flour")]
    name: String,
    #[schema(example = "g")]
    measurement_unit: String,
}

impl Ingredient {
    /// Build an [`Ingredient`] from validated components.
    pub fn new(
        id: IngredientId,
        name: impl Into<String>,
        measurement_unit: impl Into<String>,
    ) -> Result<Self, IngredientValidationError> {
        let name = name.into();
        let measurement_unit = measurement_unit.into();
        if name.trim().is_empty() {
            return Err(IngredientValidationError::EmptyName);
        }
        if name.chars().count() > INGREDIENT_NAME_MAX {
            return Err(IngredientValidationError::NameTooLong {
                max: INGREDIENT_NAME_MAX,
            });
        }
        if measurement_unit.trim().is_empty() {
            return Err(IngredientValidationError::EmptyMeasurementUnit);
        }
        Ok(Self {
            id,
            name,
            measurement_unit,
        })
    }

    /// Stable ingredient identifier.
    pub fn id(&self) -> IngredientId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit the amount is measured in.
    pub fn measurement_unit(&self) -> &str {
        &self.measurement_unit
    }
}
