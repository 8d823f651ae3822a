//! Port for favorite pair persistence.

use async_trait::async_trait;

use crate::domain::recipe::RecipeId;
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by favorite repository adapters.
    pub enum FavoriteRepositoryError {
        /// Repository connection could not be established.
        Connection => "favorite repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "favorite repository query failed: {message}",
        /// The (user, recipe) pair is already stored. Raised by the unique
        /// constraint as well as by application checks.
        Duplicate => "favorite already exists: {message}",
    }
}

/// Port for adding and removing favorite pairs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Insert the pair; fails with `Duplicate` when already present.
    async fn insert(&self, user: UserId, recipe: RecipeId) -> Result<(), FavoriteRepositoryError>;

    /// Delete the pair. Returns whether a row was removed.
    async fn delete(&self, user: UserId, recipe: RecipeId)
        -> Result<bool, FavoriteRepositoryError>;
}
