//! PostgreSQL-backed `FavoriteRepository` implementation.
//!
//! The unique constraint on (user_id, recipe_id) is the authoritative
//! duplicate check; a violation maps to the port's `Duplicate` variant so
//! concurrent double-adds lose cleanly.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError};
use crate::domain::recipe::RecipeId;
use crate::domain::user::UserId;

use super::error_mapping::{map_diesel_error_with_unique, map_pool_error};
use super::models::NewFavoriteRow;
use super::pool::{DbPool, PoolError};
use super::schema::favorites;

/// Diesel-backed implementation of the favorite repository port.
#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> FavoriteRepositoryError {
    map_pool_error(error, FavoriteRepositoryError::connection)
}

fn map_write(error: diesel::result::Error) -> FavoriteRepositoryError {
    map_diesel_error_with_unique(
        error,
        FavoriteRepositoryError::query,
        FavoriteRepositoryError::connection,
        FavoriteRepositoryError::duplicate,
    )
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn insert(&self, user: UserId, recipe: RecipeId) -> Result<(), FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(favorites::table)
            .values(&NewFavoriteRow {
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
    ) -> Result<bool, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(
            favorites::table.filter(
                favorites::user_id
                    .eq(user.value())
                    .and(favorites::recipe_id.eq(recipe.value())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_write)?;

        Ok(deleted > 0)
    }
}
