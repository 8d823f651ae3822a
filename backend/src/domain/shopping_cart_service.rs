//! Shopping cart domain service: the toggle plus ingredient aggregation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ingredient::IngredientId;
use crate::domain::ports::{
    RecipeRepository, ShoppingCartCommand, ShoppingCartRepository, ShoppingCartRepositoryError,
    ShoppingListEntry,
};
use crate::domain::recipe::{RecipeBrief, RecipeId};
use crate::domain::recipe_service::map_recipe_repository_error;
use crate::domain::user::UserId;
use crate::domain::Error;

fn map_cart_repository_error(error: ShoppingCartRepositoryError) -> Error {
    match error {
        ShoppingCartRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("shopping cart unavailable: {message}"))
        }
        ShoppingCartRepositoryError::Query { message } => {
            Error::internal(format!("shopping cart error: {message}"))
        }
        ShoppingCartRepositoryError::Duplicate { .. } => {
            Error::conflict("recipe is already in the shopping cart")
                .with_details(json!({ "code": "already_exists" }))
        }
    }
}

/// Shopping cart service implementing the cart driving port.
#[derive(Clone)]
pub struct ShoppingCartService<C, R> {
    cart: Arc<C>,
    recipes: Arc<R>,
}

impl<C, R> ShoppingCartService<C, R>
where
    C: ShoppingCartRepository,
    R: RecipeRepository,
{
    /// Create a new service over the cart and recipe ports.
    pub fn new(cart: Arc<C>, recipes: Arc<R>) -> Self {
        Self { cart, recipes }
    }

    async fn require_brief(&self, recipe: RecipeId) -> Result<RecipeBrief, Error> {
        self.recipes
            .find_brief(recipe)
            .await
            .map_err(map_recipe_repository_error)?
            .ok_or_else(|| Error::not_found(format!("recipe {recipe} not found")))
    }
}

#[async_trait]
impl<C, R> ShoppingCartCommand for ShoppingCartService<C, R>
where
    C: ShoppingCartRepository,
    R: RecipeRepository,
{
    async fn add_to_cart(&self, user: UserId, recipe: RecipeId) -> Result<RecipeBrief, Error> {
        let brief = self.require_brief(recipe).await?;
        self.cart
            .insert(user, recipe)
            .await
            .map_err(map_cart_repository_error)?;
        Ok(brief)
    }

    async fn remove_from_cart(&self, user: UserId, recipe: RecipeId) -> Result<(), Error> {
        let removed = self
            .cart
            .delete(user, recipe)
            .await
            .map_err(map_cart_repository_error)?;
        if !removed {
            return Err(Error::not_found("recipe is not in the shopping cart"));
        }
        Ok(())
    }

    async fn shopping_list(&self, user: UserId) -> Result<Vec<ShoppingListEntry>, Error> {
        let links = self
            .cart
            .load_cart_ingredients(user)
            .await
            .map_err(map_cart_repository_error)?;

        // Group by ingredient id rather than by name: two ingredients could
        // share a name while differing in unit. BTreeMap keeps the output
        // ordered by id for reproducible lists.
        let mut totals: BTreeMap<IngredientId, ShoppingListEntry> = BTreeMap::new();
        for link in links {
            let amount = i64::from(link.amount.value());
            totals
                .entry(link.ingredient.id())
                .and_modify(|entry| entry.total_amount += amount)
                .or_insert_with(|| ShoppingListEntry {
                    ingredient_name: link.ingredient.name().to_owned(),
                    measurement_unit: link.ingredient.measurement_unit().to_owned(),
                    total_amount: amount,
                });
        }

        Ok(totals.into_values().collect())
    }
}

#[cfg(test)]
#[path = "shopping_cart_service_tests.rs"]
mod tests;
