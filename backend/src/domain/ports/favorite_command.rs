//! Driving port for the favorite toggle.

use async_trait::async_trait;

use crate::domain::recipe::{RecipeBrief, RecipeId};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Domain use-case port for favoriting recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteCommand: Send + Sync {
    /// Add the recipe to the user's favorites; fails with `Conflict` when
    /// already present. Returns the favorited recipe in brief form.
    async fn add_favorite(&self, user: UserId, recipe: RecipeId) -> Result<RecipeBrief, Error>;

    /// Remove the recipe from the user's favorites; fails with `NotFound`
    /// when absent.
    async fn remove_favorite(&self, user: UserId, recipe: RecipeId) -> Result<(), Error>;
}
