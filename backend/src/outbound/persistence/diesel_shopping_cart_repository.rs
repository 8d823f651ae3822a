//! PostgreSQL-backed `ShoppingCartRepository` implementation.
//!
//! Besides the toggle pair, this adapter feeds the shopping list
//! aggregator: it loads one row per ingredient link across every recipe in
//! the user's cart and leaves the summing to the domain service.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ShoppingCartRepository, ShoppingCartRepositoryError};
use crate::domain::recipe::{IngredientAmount, MeasuredIngredient, RecipeId};
use crate::domain::user::UserId;

use super::error_mapping::{map_diesel_error, map_diesel_error_with_unique, map_pool_error};
use super::models::{IngredientRow, NewShoppingCartRow};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, recipe_ingredients, shopping_cart_entries};

/// Diesel-backed implementation of the shopping cart repository port.
#[derive(Clone)]
pub struct DieselShoppingCartRepository {
    pool: DbPool,
}

impl DieselShoppingCartRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ShoppingCartRepositoryError {
    map_pool_error(error, ShoppingCartRepositoryError::connection)
}

fn map_write(error: diesel::result::Error) -> ShoppingCartRepositoryError {
    map_diesel_error_with_unique(
        error,
        ShoppingCartRepositoryError::query,
        ShoppingCartRepositoryError::connection,
        ShoppingCartRepositoryError::duplicate,
    )
}

fn map_read(error: diesel::result::Error) -> ShoppingCartRepositoryError {
    map_diesel_error(
        error,
        ShoppingCartRepositoryError::query,
        ShoppingCartRepositoryError::connection,
    )
}

#[async_trait]
impl ShoppingCartRepository for DieselShoppingCartRepository {
    async fn insert(
        &self,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<(), ShoppingCartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(shopping_cart_entries::table)
            .values(&NewShoppingCartRow {
                user_id: user.value(),
                recipe_id: recipe.value(),
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_write)
    }

    async fn delete(
        &self,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, ShoppingCartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(
            shopping_cart_entries::table.filter(
                shopping_cart_entries::user_id
                    .eq(user.value())
                    .and(shopping_cart_entries::recipe_id.eq(recipe.value())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_write)?;

        Ok(deleted > 0)
    }

    async fn load_cart_ingredients(
        &self,
        user: UserId,
    ) -> Result<Vec<MeasuredIngredient>, ShoppingCartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // One row per link of every recipe in the cart; the join goes
        // through the cart pair's recipe_id rather than any declared
        // association, so it is written out explicitly.
        let rows: Vec<(IngredientRow, i32)> = shopping_cart_entries::table
            .inner_join(
                recipe_ingredients::table
                    .on(recipe_ingredients::recipe_id.eq(shopping_cart_entries::recipe_id)),
            )
            .inner_join(
                ingredients::table.on(ingredients::id.eq(recipe_ingredients::ingredient_id)),
            )
            .filter(shopping_cart_entries::user_id.eq(user.value()))
            .order(ingredients::id.asc())
            .select((IngredientRow::as_select(), recipe_ingredients::amount))
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        rows.into_iter()
            .map(|(row, amount)| {
                let ingredient = row
                    .into_ingredient()
                    .map_err(ShoppingCartRepositoryError::query)?;
                let amount = IngredientAmount::new(amount)
                    .map_err(|err| ShoppingCartRepositoryError::query(err.to_string()))?;
                Ok(MeasuredIngredient { ingredient, amount })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool(PoolError::checkout("connection refused"));
        assert!(matches!(err, ShoppingCartRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn read_error_maps_to_query_error() {
        let err = map_read(diesel::result::Error::NotFound);
        assert!(matches!(err, ShoppingCartRepositoryError::Query { .. }));
    }
}
