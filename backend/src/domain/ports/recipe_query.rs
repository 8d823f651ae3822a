//! Driving port for recipe list/detail reads.

use async_trait::async_trait;

use crate::domain::recipe::{RecipeId, RecipeView};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Domain use-case port for recipe reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeQuery: Send + Sync {
    /// All recipes with per-viewer flags, newest first.
    async fn list_recipes(&self, viewer: Option<UserId>) -> Result<Vec<RecipeView>, Error>;

    /// One recipe with per-viewer flags.
    async fn get_recipe(&self, id: RecipeId, viewer: Option<UserId>) -> Result<RecipeView, Error>;
}
