//! Recipe domain service.
//!
//! Implements the recipe command and query driving ports: drafts are
//! validated against reference data loaded through the reference port, the
//! image payload is handed to the image store, and the write is delegated
//! to the repository, which applies it transactionally. All validation
//! happens before any mutation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    ImageStore, ImageStoreError, RecipeCommand, RecipeQuery, RecipeRepository,
    RecipeRepositoryError, ReferenceDataRepository, ReferenceRepositoryError,
};
use crate::domain::recipe::{
    validate, RecipeDraft, RecipeId, RecipeValidationError, RecipeView, ReferenceSnapshot,
};
use crate::domain::user::UserId;
use crate::domain::Error;

pub(crate) fn map_recipe_repository_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
        RecipeRepositoryError::WriteFailed { message } => {
            Error::internal(format!("recipe write failed and was rolled back: {message}"))
                .with_details(json!({ "code": "write_failed" }))
        }
    }
}

pub(crate) fn map_reference_repository_error(error: ReferenceRepositoryError) -> Error {
    match error {
        ReferenceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("reference data unavailable: {message}"))
        }
        ReferenceRepositoryError::Query { message } => {
            Error::internal(format!("reference data error: {message}"))
        }
    }
}

fn map_validation_error(error: RecipeValidationError) -> Error {
    let details = match &error {
        RecipeValidationError::MissingField { field } => json!({
            "code": error.kind(),
            "field": field,
        }),
        RecipeValidationError::UnknownTag {
            requested,
            resolved,
        }
        | RecipeValidationError::UnknownIngredient {
            requested,
            resolved,
        } => json!({
            "code": error.kind(),
            "requested": requested,
            "resolved": resolved,
        }),
        _ => json!({ "code": error.kind() }),
    };
    Error::invalid_request(error.to_string()).with_details(details)
}

fn map_image_store_error(error: ImageStoreError) -> Error {
    match error {
        ImageStoreError::InvalidPayload { message } => {
            Error::invalid_request(format!("image payload rejected: {message}"))
                .with_details(json!({ "code": "invalid_image" }))
        }
        ImageStoreError::Io { message } => Error::internal(format!("image store failed: {message}")),
    }
}

/// Recipe service implementing the command and query driving ports.
#[derive(Clone)]
pub struct RecipeService<R, D, I> {
    recipes: Arc<R>,
    reference: Arc<D>,
    images: Arc<I>,
}

impl<R, D, I> RecipeService<R, D, I>
where
    R: RecipeRepository,
    D: ReferenceDataRepository,
    I: ImageStore,
{
    /// Create a new service over the recipe, reference data, and image
    /// store ports.
    pub fn new(recipes: Arc<R>, reference: Arc<D>, images: Arc<I>) -> Self {
        Self {
            recipes,
            reference,
            images,
        }
    }

    /// Resolve the draft's tag and ingredient references read-only.
    async fn load_reference(&self, draft: &RecipeDraft) -> Result<ReferenceSnapshot, Error> {
        let tags = self
            .reference
            .resolve_tags(&draft.tags)
            .await
            .map_err(map_reference_repository_error)?;
        let ingredient_ids: Vec<_> = draft.ingredients.iter().map(|entry| entry.id).collect();
        let ingredients = self
            .reference
            .resolve_ingredients(&ingredient_ids)
            .await
            .map_err(map_reference_repository_error)?;
        Ok(ReferenceSnapshot::new(tags, ingredients))
    }

    /// Load the recipe's author or fail with `NotFound`.
    async fn require_author(&self, recipe_id: RecipeId) -> Result<UserId, Error> {
        self.recipes
            .find_author(recipe_id)
            .await
            .map_err(map_recipe_repository_error)?
            .ok_or_else(|| Error::not_found(format!("recipe {recipe_id} not found")))
    }

    async fn view_after_write(
        &self,
        recipe_id: RecipeId,
        viewer: UserId,
    ) -> Result<RecipeView, Error> {
        self.recipes
            .find_view(recipe_id, Some(viewer))
            .await
            .map_err(map_recipe_repository_error)?
            .ok_or_else(|| Error::internal(format!("recipe {recipe_id} missing after write")))
    }
}

#[async_trait]
impl<R, D, I> RecipeCommand for RecipeService<R, D, I>
where
    R: RecipeRepository,
    D: ReferenceDataRepository,
    I: ImageStore,
{
    async fn create_recipe(
        &self,
        author: UserId,
        draft: RecipeDraft,
    ) -> Result<RecipeView, Error> {
        let reference = self.load_reference(&draft).await?;
        let validated = validate(&draft, &reference).map_err(map_validation_error)?;
        let image = self
            .images
            .store(validated.image())
            .await
            .map_err(map_image_store_error)?;
        let recipe_id = self
            .recipes
            .create(author, &validated, &image.url)
            .await
            .map_err(map_recipe_repository_error)?;
        self.view_after_write(recipe_id, author).await
    }

    async fn update_recipe(
        &self,
        recipe_id: RecipeId,
        caller: UserId,
        draft: RecipeDraft,
    ) -> Result<RecipeView, Error> {
        let author = self.require_author(recipe_id).await?;
        if author != caller {
            return Err(Error::forbidden("only the author may edit this recipe"));
        }

        let reference = self.load_reference(&draft).await?;
        let validated = validate(&draft, &reference).map_err(map_validation_error)?;
        let image = self
            .images
            .store(validated.image())
            .await
            .map_err(map_image_store_error)?;
        self.recipes
            .replace(recipe_id, &validated, &image.url)
            .await
            .map_err(map_recipe_repository_error)?;
        self.view_after_write(recipe_id, caller).await
    }

    async fn delete_recipe(&self, recipe_id: RecipeId, caller: UserId) -> Result<(), Error> {
        let author = self.require_author(recipe_id).await?;
        if author != caller {
            return Err(Error::forbidden("only the author may delete this recipe"));
        }

        let deleted = self
            .recipes
            .delete(recipe_id)
            .await
            .map_err(map_recipe_repository_error)?;
        if !deleted {
            return Err(Error::not_found(format!("recipe {recipe_id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl<R, D, I> RecipeQuery for RecipeService<R, D, I>
where
    R: RecipeRepository,
    D: ReferenceDataRepository,
    I: ImageStore,
{
    async fn list_recipes(&self, viewer: Option<UserId>) -> Result<Vec<RecipeView>, Error> {
        self.recipes
            .list_views(viewer)
            .await
            .map_err(map_recipe_repository_error)
    }

    async fn get_recipe(&self, id: RecipeId, viewer: Option<UserId>) -> Result<RecipeView, Error> {
        self.recipes
            .find_view(id, viewer)
            .await
            .map_err(map_recipe_repository_error)?
            .ok_or_else(|| Error::not_found(format!("recipe {id} not found")))
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
