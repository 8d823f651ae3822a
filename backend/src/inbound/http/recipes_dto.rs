//! Wire representations for the recipe endpoints.
//!
//! Request DTOs default every optional collection so presence failures
//! reach the domain validator (which reports the machine-readable kind)
//! instead of dying in serde. Response DTOs flatten resolved ingredients
//! into `{id, name, measurement_unit, amount}` rows.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::SubscriptionView;
use crate::domain::recipe::{
    AuthorView, IngredientDraft, RecipeBrief, RecipeDraft, RecipeView,
};
use crate::domain::tag::Tag;
use crate::domain::user::User;
use crate::domain::{IngredientId, TagId};

/// One `{id, amount}` ingredient reference in a write request.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RecipeIngredientRequest {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 2)]
    pub amount: i32,
}

/// Recipe create/update request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RecipeRequest {
    #[serde(default)]
    #[schema(example = "Porridge")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Stir and wait.")]
    pub text: String,
    #[serde(default)]
    #[schema(example = 10)]
    pub cooking_time: i32,
    /// Base64 data URL, e.g. `data:image/png;base64,...`.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<i64>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientRequest>,
}

impl From<RecipeRequest> for RecipeDraft {
    fn from(value: RecipeRequest) -> Self {
        Self {
            name: value.name,
            text: value.text,
            cooking_time: value.cooking_time,
            image: value.image,
            tags: value.tags.into_iter().map(TagId::new).collect(),
            ingredients: value
                .ingredients
                .into_iter()
                .map(|entry| IngredientDraft {
                    id: IngredientId::new(entry.id),
                    amount: entry.amount,
                })
                .collect(),
        }
    }
}

/// Tag row as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub color: String,
}

impl From<&Tag> for TagDto {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id().value(),
            name: tag.name().to_owned(),
            slug: tag.slug().as_ref().to_owned(),
            color: tag.color().as_ref().to_owned(),
        }
    }
}

/// Account as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            email: user.email().as_ref().to_owned(),
            username: user.username().as_ref().to_owned(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
        }
    }
}

/// Recipe author with the viewer's subscription flag.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub is_subscribed: bool,
}

impl From<&AuthorView> for AuthorDto {
    fn from(view: &AuthorView) -> Self {
        Self {
            user: UserDto::from(&view.user),
            is_subscribed: view.is_subscribed,
        }
    }
}

/// Resolved ingredient row with its amount.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeIngredientDto {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Full recipe representation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeDto {
    pub id: i64,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: String,
    pub author: AuthorDto,
    pub tags: Vec<TagDto>,
    pub ingredients: Vec<RecipeIngredientDto>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl From<&RecipeView> for RecipeDto {
    fn from(view: &RecipeView) -> Self {
        Self {
            id: view.id.value(),
            name: view.name.clone(),
            text: view.text.clone(),
            cooking_time: view.cooking_time.minutes(),
            image: view.image_url.clone(),
            author: AuthorDto::from(&view.author),
            tags: view.tags.iter().map(TagDto::from).collect(),
            ingredients: view
                .ingredients
                .iter()
                .map(|entry| RecipeIngredientDto {
                    id: entry.ingredient.id().value(),
                    name: entry.ingredient.name().to_owned(),
                    measurement_unit: entry.ingredient.measurement_unit().to_owned(),
                    amount: entry.amount.value(),
                })
                .collect(),
            is_favorited: view.is_favorited,
            is_in_shopping_cart: view.is_in_shopping_cart,
        }
    }
}

/// Condensed recipe representation for nested payloads.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeBriefDto {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<&RecipeBrief> for RecipeBriefDto {
    fn from(brief: &RecipeBrief) -> Self {
        Self {
            id: brief.id.value(),
            name: brief.name.clone(),
            image: brief.image_url.clone(),
            cooking_time: brief.cooking_time.minutes(),
        }
    }
}

/// Subscribed author with their recipes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionDto {
    #[serde(flatten)]
    pub author: UserDto,
    pub is_subscribed: bool,
    pub recipes: Vec<RecipeBriefDto>,
    pub recipes_count: usize,
}

impl From<&SubscriptionView> for SubscriptionDto {
    fn from(view: &SubscriptionView) -> Self {
        Self {
            author: UserDto::from(&view.author),
            is_subscribed: view.is_subscribed,
            recipes: view.recipes.iter().map(RecipeBriefDto::from).collect(),
            recipes_count: view.recipes_count,
        }
    }
}
