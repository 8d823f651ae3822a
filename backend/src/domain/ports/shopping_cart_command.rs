//! Driving port for the shopping cart toggle and the aggregated list.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::recipe::{RecipeBrief, RecipeId};
use crate::domain::user::UserId;
use crate::domain::Error;

/// One aggregated row of a user's shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingListEntry {
    #[schema(example = "flour")]
    pub ingredient_name: String,
    #[schema(example = "g")]
    pub measurement_unit: String,
    /// Sum of this ingredient's amounts across every recipe in the cart.
    #[schema(example = 5)]
    pub total_amount: i64,
}

/// Domain use-case port for the shopping cart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingCartCommand: Send + Sync {
    /// Add the recipe to the user's cart; fails with `Conflict` when
    /// already present. Returns the added recipe in brief form.
    async fn add_to_cart(&self, user: UserId, recipe: RecipeId) -> Result<RecipeBrief, Error>;

    /// Remove the recipe from the user's cart; fails with `NotFound` when
    /// absent.
    async fn remove_from_cart(&self, user: UserId, recipe: RecipeId) -> Result<(), Error>;

    /// Deduplicated, summed ingredient list across the cart's recipes,
    /// ingredient id ascending. An empty cart yields an empty list.
    async fn shopping_list(&self, user: UserId) -> Result<Vec<ShoppingListEntry>, Error>;
}
