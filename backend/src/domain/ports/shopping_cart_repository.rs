//! Port for shopping cart persistence and ingredient link reads.

use async_trait::async_trait;

use crate::domain::recipe::{MeasuredIngredient, RecipeId};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by shopping cart adapters.
    pub enum ShoppingCartRepositoryError {
        /// Repository connection could not be established.
        Connection => "shopping cart connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "shopping cart query failed: {message}",
        /// The (user, recipe) pair is already stored.
        Duplicate => "cart entry already exists: {message}",
    }
}

/// Port for cart entries and the link rows behind the shopping list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingCartRepository: Send + Sync {
    /// Insert the pair; fails with `Duplicate` when already present.
    async fn insert(
        &self,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<(), ShoppingCartRepositoryError>;

    /// Delete the pair. Returns whether a row was removed.
    async fn delete(
        &self,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, ShoppingCartRepositoryError>;

    /// Every ingredient link of every recipe in the user's cart, one entry
    /// per link row. Ingredients may repeat across recipes; aggregation is
    /// the caller's job.
    async fn load_cart_ingredients(
        &self,
        user: UserId,
    ) -> Result<Vec<MeasuredIngredient>, ShoppingCartRepositoryError>;
}
