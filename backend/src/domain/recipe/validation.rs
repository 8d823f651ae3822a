//! Recipe draft validation.
//!
//! Checks run in a fixed order and each failure maps to one distinct,
//! reportable kind. Validation is read-only: the reference snapshot is
//! loaded before any check and no store mutation happens here.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::domain::ingredient::{Ingredient, IngredientId};
use crate::domain::tag::{Tag, TagId};

use super::{CookingTime, IngredientAmount, MeasuredIngredient, RecipeDraft, ValidatedRecipe};

/// Distinct failure kinds produced by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    /// A required collection or field is absent or empty.
    #[error("field `{field}` is required and must not be empty")]
    MissingField { field: &'static str },
    /// The same tag id appears more than once in the payload.
    #[error("tag {id} appears more than once")]
    DuplicateTag { id: TagId },
    /// At least one tag id did not resolve to a stored tag.
    ///
    /// Reports the aggregate counts rather than the offending ids,
    /// matching the coarse-grained contract of the existence check.
    #[error("{resolved} of {requested} referenced tags exist")]
    UnknownTag { requested: usize, resolved: usize },
    /// The same ingredient id appears more than once in the payload.
    #[error("ingredient {id} appears more than once")]
    DuplicateIngredient { id: IngredientId },
    /// An ingredient amount is below one.
    #[error("ingredient amount must be at least 1, got {amount}")]
    InvalidAmount { amount: i32 },
    /// At least one ingredient id did not resolve to a stored ingredient.
    #[error("{resolved} of {requested} referenced ingredients exist")]
    UnknownIngredient { requested: usize, resolved: usize },
    /// Cooking time is below one minute.
    #[error("cooking time must be at least 1 minute, got {minutes}")]
    InvalidCookingTime { minutes: i32 },
}

impl RecipeValidationError {
    /// Stable machine-readable code for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::DuplicateTag { .. } => "duplicate_tag",
            Self::UnknownTag { .. } => "unknown_tag",
            Self::DuplicateIngredient { .. } => "duplicate_ingredient",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::UnknownIngredient { .. } => "unknown_ingredient",
            Self::InvalidCookingTime { .. } => "invalid_cooking_time",
        }
    }
}

/// Reference rows resolved for one draft, loaded read-only before
/// validation.
///
/// The snapshot holds whatever subset of the draft's tag and ingredient
/// ids actually exists; count mismatches are what the existence checks
/// detect.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSnapshot {
    tags: Vec<Tag>,
    ingredients: Vec<Ingredient>,
}

impl ReferenceSnapshot {
    /// Bundle resolved tag and ingredient rows.
    pub fn new(tags: Vec<Tag>, ingredients: Vec<Ingredient>) -> Self {
        Self { tags, ingredients }
    }

    /// Resolved tags.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Resolved ingredients.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }
}

impl fmt::Display for ReferenceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tags, {} ingredients",
            self.tags.len(),
            self.ingredients.len()
        )
    }
}

/// Validate a draft against resolved reference data.
///
/// Rules apply in order: presence, tag duplication, tag existence,
/// ingredient duplication, ingredient amount, ingredient existence, then
/// cooking time. The first violated rule is returned.
pub fn validate(
    draft: &RecipeDraft,
    reference: &ReferenceSnapshot,
) -> Result<ValidatedRecipe, RecipeValidationError> {
    if draft.ingredients.is_empty() {
        return Err(RecipeValidationError::MissingField {
            field: "ingredients",
        });
    }
    if draft.tags.is_empty() {
        return Err(RecipeValidationError::MissingField { field: "tags" });
    }
    if draft.image.as_deref().is_none_or(str::is_empty) {
        return Err(RecipeValidationError::MissingField { field: "image" });
    }
    if draft.name.trim().is_empty() {
        return Err(RecipeValidationError::MissingField { field: "name" });
    }

    let mut seen_tags = HashSet::new();
    for id in &draft.tags {
        if !seen_tags.insert(*id) {
            return Err(RecipeValidationError::DuplicateTag { id: *id });
        }
    }

    let tags_by_id: HashMap<TagId, &Tag> =
        reference.tags.iter().map(|tag| (tag.id(), tag)).collect();
    let resolved_tags: Vec<Tag> = draft
        .tags
        .iter()
        .filter_map(|id| tags_by_id.get(id).copied().cloned())
        .collect();
    if resolved_tags.len() != draft.tags.len() {
        return Err(RecipeValidationError::UnknownTag {
            requested: draft.tags.len(),
            resolved: resolved_tags.len(),
        });
    }

    let mut seen_ingredients = HashSet::new();
    for entry in &draft.ingredients {
        if !seen_ingredients.insert(entry.id) {
            return Err(RecipeValidationError::DuplicateIngredient { id: entry.id });
        }
    }

    for entry in &draft.ingredients {
        if entry.amount < 1 {
            return Err(RecipeValidationError::InvalidAmount {
                amount: entry.amount,
            });
        }
    }

    let ingredients_by_id: HashMap<IngredientId, &Ingredient> = reference
        .ingredients
        .iter()
        .map(|ingredient| (ingredient.id(), ingredient))
        .collect();
    let measured: Vec<MeasuredIngredient> = draft
        .ingredients
        .iter()
        .filter_map(|entry| {
            let ingredient = ingredients_by_id.get(&entry.id).copied().cloned()?;
            let amount = IngredientAmount::new(entry.amount).ok()?;
            Some(MeasuredIngredient { ingredient, amount })
        })
        .collect();
    if measured.len() != draft.ingredients.len() {
        return Err(RecipeValidationError::UnknownIngredient {
            requested: draft.ingredients.len(),
            resolved: measured.len(),
        });
    }

    let cooking_time = CookingTime::new(draft.cooking_time)?;
    let image = draft.image.clone().unwrap_or_default();

    Ok(ValidatedRecipe {
        name: draft.name.clone(),
        text: draft.text.clone(),
        cooking_time,
        image,
        tags: resolved_tags,
        ingredients: measured,
    })
}
