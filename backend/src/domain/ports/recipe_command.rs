//! Driving port for recipe create/update/delete use-cases.

use async_trait::async_trait;

use crate::domain::recipe::{RecipeDraft, RecipeId, RecipeView};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Domain use-case port for recipe mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCommand: Send + Sync {
    /// Validate a draft and persist it as a new recipe owned by `author`.
    async fn create_recipe(&self, author: UserId, draft: RecipeDraft)
        -> Result<RecipeView, Error>;

    /// Validate a draft and replace the recipe's content in full. Only the
    /// recipe's author may update it.
    async fn update_recipe(
        &self,
        recipe_id: RecipeId,
        caller: UserId,
        draft: RecipeDraft,
    ) -> Result<RecipeView, Error>;

    /// Delete a recipe. Only the recipe's author may delete it.
    async fn delete_recipe(&self, recipe_id: RecipeId, caller: UserId) -> Result<(), Error>;
}
