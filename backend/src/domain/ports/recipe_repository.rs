//! Port for recipe persistence adapters and their errors.
//!
//! The write operations are contractually atomic: an adapter must apply the
//! recipe row, its tag joins, and its ingredient links inside one logical
//! transaction, rolling everything back on failure. Constraint or
//! foreign-key violations surfacing mid-write (for example an ingredient
//! deleted after validation) map to `WriteFailed`, never to a panic.

use async_trait::async_trait;

use crate::domain::recipe::{RecipeBrief, RecipeId, RecipeView, ValidatedRecipe};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection => "recipe repository connection failed: {message}",
        /// Read query failed during execution.
        Query => "recipe repository query failed: {message}",
        /// A transactional write failed and was rolled back in full.
        WriteFailed => "recipe write failed and was rolled back: {message}",
    }
}

/// Port for writing recipes and reading their nested representations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Persist a new recipe with its tag joins and ingredient links in one
    /// transaction. Returns the new recipe id.
    async fn create(
        &self,
        author: UserId,
        recipe: &ValidatedRecipe,
        image_url: &str,
    ) -> Result<RecipeId, RecipeRepositoryError>;

    /// Replace a recipe's row, tag joins, and ingredient links in one
    /// transaction. Existing links are deleted and re-inserted wholesale,
    /// never merged.
    async fn replace(
        &self,
        recipe_id: RecipeId,
        recipe: &ValidatedRecipe,
        image_url: &str,
    ) -> Result<(), RecipeRepositoryError>;

    /// Delete a recipe; links, favorites, and cart entries cascade.
    /// Returns whether a row was removed.
    async fn delete(&self, recipe_id: RecipeId) -> Result<bool, RecipeRepositoryError>;

    /// Author of the given recipe, if it exists.
    async fn find_author(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Option<UserId>, RecipeRepositoryError>;

    /// Brief row for one recipe, if it exists.
    async fn find_brief(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Option<RecipeBrief>, RecipeRepositoryError>;

    /// Full nested view of one recipe with per-viewer flags.
    async fn find_view(
        &self,
        recipe_id: RecipeId,
        viewer: Option<UserId>,
    ) -> Result<Option<RecipeView>, RecipeRepositoryError>;

    /// Full nested views of all recipes, newest first.
    async fn list_views(
        &self,
        viewer: Option<UserId>,
    ) -> Result<Vec<RecipeView>, RecipeRepositoryError>;

    /// Brief rows for one author's recipes, newest first.
    async fn list_briefs_by_author(
        &self,
        author: UserId,
    ) -> Result<Vec<RecipeBrief>, RecipeRepositoryError>;
}
