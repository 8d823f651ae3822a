//! Recipe aggregate, draft payloads, and read models.
//!
//! A recipe arrives as a [`RecipeDraft`] (unchecked client payload), passes
//! through [`validation`] against resolved reference data, and is persisted
//! as a [`ValidatedRecipe`]. Read paths reconstruct [`RecipeView`] values
//! with nested author, tags, and measured ingredients.

mod validation;

pub use validation::{validate, RecipeValidationError, ReferenceSnapshot};

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ingredient::{Ingredient, IngredientId};
use crate::domain::tag::{Tag, TagId};
use crate::domain::user::User;

/// Stable recipe identifier backed by a BIGSERIAL column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct RecipeId(i64);

impl RecipeId {
    /// Wrap a raw database identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Minutes until the dish is ready. Strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CookingTime(i32);

impl CookingTime {
    /// Validate and construct a [`CookingTime`].
    pub fn new(minutes: i32) -> Result<Self, RecipeValidationError> {
        if minutes < 1 {
            return Err(RecipeValidationError::InvalidCookingTime { minutes });
        }
        Ok(Self(minutes))
    }

    /// Minutes as a raw value.
    pub fn minutes(self) -> i32 {
        self.0
    }
}

/// Quantity of one ingredient within one recipe. Strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct IngredientAmount(i32);

impl IngredientAmount {
    /// Validate and construct an [`IngredientAmount`].
    pub fn new(amount: i32) -> Result<Self, RecipeValidationError> {
        if amount < 1 {
            return Err(RecipeValidationError::InvalidAmount { amount });
        }
        Ok(Self(amount))
    }

    /// Amount as a raw value.
    pub fn value(self) -> i32 {
        self.0
    }
}

/// One `{id, amount}` entry of a draft's ingredient list, still unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientDraft {
    pub id: IngredientId,
    pub amount: i32,
}

/// Unchecked recipe payload as submitted by a client.
///
/// `image` carries the base64 data URL untouched; the validator only checks
/// its presence, decoding is left to the image store collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: Option<String>,
    pub tags: Vec<TagId>,
    pub ingredients: Vec<IngredientDraft>,
}

/// A resolved ingredient together with its validated amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MeasuredIngredient {
    pub ingredient: Ingredient,
    pub amount: IngredientAmount,
}

/// Recipe payload that has passed every structural and referential check
/// and is safe to hand to the writer.
///
/// Only [`validate`] constructs this type, so holding a value implies the
/// draft's tag and ingredient references resolved and all quantities are
/// positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecipe {
    name: String,
    text: String,
    cooking_time: CookingTime,
    image: String,
    tags: Vec<Tag>,
    ingredients: Vec<MeasuredIngredient>,
}

impl ValidatedRecipe {
    /// Recipe name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Minutes until ready.
    pub fn cooking_time(&self) -> CookingTime {
        self.cooking_time
    }

    /// Base64 data URL of the image, still encoded.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Resolved tags in payload order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Resolved ingredients with validated amounts, in payload order.
    pub fn ingredients(&self) -> &[MeasuredIngredient] {
        &self.ingredients
    }
}

/// Condensed recipe representation for nested listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeBrief {
    #[schema(value_type = i64, example = 1)]
    pub id: RecipeId,
    #[schema(example = "Porridge")]
    pub name: String,
    #[schema(example = "/media/recipes/3f7a.png")]
    pub image_url: String,
    #[schema(value_type = i32, example = 10)]
    pub cooking_time: CookingTime,
}

/// Recipe author as seen by a specific requesting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorView {
    #[serde(flatten)]
    pub user: User,
    pub is_subscribed: bool,
}

/// Full recipe representation for list and detail reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeView {
    #[schema(value_type = i64, example = 1)]
    pub id: RecipeId,
    pub name: String,
    pub text: String,
    #[schema(value_type = i32, example = 10)]
    pub cooking_time: CookingTime,
    pub image_url: String,
    pub author: AuthorView,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<MeasuredIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl RecipeView {
    /// Condense the view into its brief form.
    pub fn brief(&self) -> RecipeBrief {
        RecipeBrief {
            id: self.id,
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            cooking_time: self.cooking_time,
        }
    }
}
