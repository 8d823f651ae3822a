//! Port for tag and ingredient reference data reads.
//!
//! Validation resolves draft references through this port before any write;
//! the list/detail read endpoints reuse the same queries.

use async_trait::async_trait;

use crate::domain::ingredient::{Ingredient, IngredientId};
use crate::domain::tag::{Tag, TagId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by reference data adapters.
    pub enum ReferenceRepositoryError {
        /// Repository connection could not be established.
        Connection => "reference data connection failed: {message}",
        /// Query failed during execution.
        Query => "reference data query failed: {message}",
    }
}

/// Port for reading tags and ingredients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceDataRepository: Send + Sync {
    /// Resolve the subset of the given tag ids that exists.
    async fn resolve_tags(&self, ids: &[TagId]) -> Result<Vec<Tag>, ReferenceRepositoryError>;

    /// Resolve the subset of the given ingredient ids that exists.
    async fn resolve_ingredients(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, ReferenceRepositoryError>;

    /// All tags, id ascending.
    async fn list_tags(&self) -> Result<Vec<Tag>, ReferenceRepositoryError>;

    /// One tag by id.
    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, ReferenceRepositoryError>;

    /// All ingredients, optionally filtered by a case-insensitive name
    /// prefix, id ascending.
    async fn list_ingredients<'a>(
        &self,
        name_prefix: Option<&'a str>,
    ) -> Result<Vec<Ingredient>, ReferenceRepositoryError>;

    /// One ingredient by id.
    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, ReferenceRepositoryError>;
}
