//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.
//!
//! Writes are transactional: the recipe row, its tag joins, and its
//! ingredient links are applied inside one `conn.transaction` so readers
//! never observe a partially written recipe. Any failure inside the
//! transaction, including constraint violations from reference rows
//! deleted after validation, rolls back and surfaces as `WriteFailed`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::recipe::{
    AuthorView, CookingTime, IngredientAmount, MeasuredIngredient, RecipeBrief, RecipeId,
    RecipeView, ValidatedRecipe,
};
use crate::domain::user::UserId;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    IngredientRow, NewRecipeIngredientRow, NewRecipeRow, NewRecipeTagRow, RecipeRow, RecipeUpdate,
    TagRow, UserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_cart_entries,
    subscriptions, tags, users,
};

/// Diesel-backed implementation of the recipe repository port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> RecipeRepositoryError {
    map_pool_error(error, RecipeRepositoryError::connection)
}

fn map_read(error: diesel::result::Error) -> RecipeRepositoryError {
    map_diesel_error(
        error,
        RecipeRepositoryError::query,
        RecipeRepositoryError::connection,
    )
}

/// Every failure inside a write transaction means the transaction rolled
/// back, so it maps to `WriteFailed` unless the connection itself died.
fn map_write(error: diesel::result::Error) -> RecipeRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            RecipeRepositoryError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => {
            RecipeRepositoryError::write_failed(info.message().to_owned())
        }
        other => RecipeRepositoryError::write_failed(other.to_string()),
    }
}

fn link_rows(recipe_id: i64, recipe: &ValidatedRecipe) -> Vec<NewRecipeIngredientRow> {
    recipe
        .ingredients()
        .iter()
        .map(|entry| NewRecipeIngredientRow {
            recipe_id,
            ingredient_id: entry.ingredient.id().value(),
            amount: entry.amount.value(),
        })
        .collect()
}

fn tag_rows(recipe_id: i64, recipe: &ValidatedRecipe) -> Vec<NewRecipeTagRow> {
    recipe
        .tags()
        .iter()
        .map(|tag| NewRecipeTagRow {
            recipe_id,
            tag_id: tag.id().value(),
        })
        .collect()
}

fn row_to_brief(row: RecipeRow) -> Result<RecipeBrief, RecipeRepositoryError> {
    let cooking_time = CookingTime::new(row.cooking_time)
        .map_err(|err| RecipeRepositoryError::query(err.to_string()))?;
    Ok(RecipeBrief {
        id: RecipeId::new(row.id),
        name: row.name,
        image_url: row.image_url,
        cooking_time,
    })
}

async fn load_recipe_tags(
    conn: &mut AsyncPgConnection,
    recipe_id: i64,
) -> Result<Vec<crate::domain::tag::Tag>, RecipeRepositoryError> {
    let rows: Vec<TagRow> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq(recipe_id))
        .order(tags::id.asc())
        .select(TagRow::as_select())
        .load(conn)
        .await
        .map_err(map_read)?;

    rows.into_iter()
        .map(|row| row.into_tag().map_err(RecipeRepositoryError::query))
        .collect()
}

async fn load_recipe_ingredients(
    conn: &mut AsyncPgConnection,
    recipe_id: i64,
) -> Result<Vec<MeasuredIngredient>, RecipeRepositoryError> {
    let rows: Vec<(IngredientRow, i32)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq(recipe_id))
        .order(ingredients::id.asc())
        .select((IngredientRow::as_select(), recipe_ingredients::amount))
        .load(conn)
        .await
        .map_err(map_read)?;

    rows.into_iter()
        .map(|(row, amount)| {
            let ingredient = row
                .into_ingredient()
                .map_err(RecipeRepositoryError::query)?;
            let amount = IngredientAmount::new(amount)
                .map_err(|err| RecipeRepositoryError::query(err.to_string()))?;
            Ok(MeasuredIngredient { ingredient, amount })
        })
        .collect()
}

async fn pair_exists(
    conn: &mut AsyncPgConnection,
    viewer: UserId,
    recipe_id: i64,
    table: PairTable,
) -> Result<bool, RecipeRepositoryError> {
    let result = match table {
        PairTable::Favorites => {
            diesel::select(diesel::dsl::exists(
                favorites::table.filter(
                    favorites::user_id
                        .eq(viewer.value())
                        .and(favorites::recipe_id.eq(recipe_id)),
                ),
            ))
            .get_result::<bool>(conn)
            .await
        }
        PairTable::ShoppingCart => {
            diesel::select(diesel::dsl::exists(
                shopping_cart_entries::table.filter(
                    shopping_cart_entries::user_id
                        .eq(viewer.value())
                        .and(shopping_cart_entries::recipe_id.eq(recipe_id)),
                ),
            ))
            .get_result::<bool>(conn)
            .await
        }
    };
    result.map_err(map_read)
}

#[derive(Clone, Copy)]
enum PairTable {
    Favorites,
    ShoppingCart,
}

async fn subscribed(
    conn: &mut AsyncPgConnection,
    viewer: UserId,
    author_id: i64,
) -> Result<bool, RecipeRepositoryError> {
    diesel::select(diesel::dsl::exists(
        subscriptions::table.filter(
            subscriptions::user_id
                .eq(viewer.value())
                .and(subscriptions::author_id.eq(author_id)),
        ),
    ))
    .get_result::<bool>(conn)
    .await
    .map_err(map_read)
}

async fn assemble_view(
    conn: &mut AsyncPgConnection,
    recipe: RecipeRow,
    author: UserRow,
    viewer: Option<UserId>,
) -> Result<RecipeView, RecipeRepositoryError> {
    let recipe_id = recipe.id;
    let author_id = recipe.author_id;
    let tags = load_recipe_tags(conn, recipe_id).await?;
    let ingredients = load_recipe_ingredients(conn, recipe_id).await?;

    let (is_favorited, is_in_shopping_cart, is_subscribed) = match viewer {
        Some(viewer) => (
            pair_exists(conn, viewer, recipe_id, PairTable::Favorites).await?,
            pair_exists(conn, viewer, recipe_id, PairTable::ShoppingCart).await?,
            subscribed(conn, viewer, author_id).await?,
        ),
        None => (false, false, false),
    };

    let user = author.into_user().map_err(RecipeRepositoryError::query)?;
    let cooking_time = CookingTime::new(recipe.cooking_time)
        .map_err(|err| RecipeRepositoryError::query(err.to_string()))?;

    Ok(RecipeView {
        id: RecipeId::new(recipe_id),
        name: recipe.name,
        text: recipe.text,
        cooking_time,
        image_url: recipe.image_url,
        author: AuthorView {
            user,
            is_subscribed,
        },
        tags,
        ingredients,
        is_favorited,
        is_in_shopping_cart,
    })
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn create(
        &self,
        author: UserId,
        recipe: &ValidatedRecipe,
        image_url: &str,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewRecipeRow {
            author_id: author.value(),
            name: recipe.name(),
            image_url,
            text: recipe.text(),
            cooking_time: recipe.cooking_time().minutes(),
        };

        let recipe_id = conn
            .transaction(|conn| {
                async move {
                    let recipe_id: i64 = diesel::insert_into(recipes::table)
                        .values(&new_row)
                        .returning(recipes::id)
                        .get_result(conn)
                        .await?;

                    diesel::insert_into(recipe_tags::table)
                        .values(tag_rows(recipe_id, recipe))
                        .execute(conn)
                        .await?;

                    diesel::insert_into(recipe_ingredients::table)
                        .values(link_rows(recipe_id, recipe))
                        .execute(conn)
                        .await?;

                    Ok::<_, diesel::result::Error>(recipe_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_write)?;

        Ok(RecipeId::new(recipe_id))
    }

    async fn replace(
        &self,
        recipe_id: RecipeId,
        recipe: &ValidatedRecipe,
        image_url: &str,
    ) -> Result<(), RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let update = RecipeUpdate {
            name: recipe.name(),
            image_url,
            text: recipe.text(),
            cooking_time: recipe.cooking_time().minutes(),
        };
        let id = recipe_id.value();

        conn.transaction(|conn| {
            async move {
                diesel::update(recipes::table.filter(recipes::id.eq(id)))
                    .set(&update)
                    .execute(conn)
                    .await?;

                // Full replacement, not a merge: drop every existing join
                // row, then bulk-insert the validated set.
                diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(id)))
                    .execute(conn)
                    .await?;
                diesel::insert_into(recipe_tags::table)
                    .values(tag_rows(id, recipe))
                    .execute(conn)
                    .await?;

                diesel::delete(
                    recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(id)),
                )
                .execute(conn)
                .await?;
                diesel::insert_into(recipe_ingredients::table)
                    .values(link_rows(id, recipe))
                    .execute(conn)
                    .await?;

                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_write)
    }

    async fn delete(&self, recipe_id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(recipes::table.filter(recipes::id.eq(recipe_id.value())))
            .execute(&mut conn)
            .await
            .map_err(map_write)?;

        Ok(deleted > 0)
    }

    async fn find_author(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Option<UserId>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let author_id = recipes::table
            .filter(recipes::id.eq(recipe_id.value()))
            .select(recipes::author_id)
            .first::<i64>(&mut conn)
            .await
            .optional()
            .map_err(map_read)?;

        Ok(author_id.map(UserId::new))
    }

    async fn find_brief(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Option<RecipeBrief>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = recipes::table
            .filter(recipes::id.eq(recipe_id.value()))
            .select(RecipeRow::as_select())
            .first::<RecipeRow>(&mut conn)
            .await
            .optional()
            .map_err(map_read)?;

        row.map(row_to_brief).transpose()
    }

    async fn find_view(
        &self,
        recipe_id: RecipeId,
        viewer: Option<UserId>,
    ) -> Result<Option<RecipeView>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = recipes::table
            .inner_join(users::table)
            .filter(recipes::id.eq(recipe_id.value()))
            .select((RecipeRow::as_select(), UserRow::as_select()))
            .first::<(RecipeRow, UserRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_read)?;

        match row {
            Some((recipe, author)) => {
                Ok(Some(assemble_view(&mut conn, recipe, author, viewer).await?))
            }
            None => Ok(None),
        }
    }

    async fn list_views(
        &self,
        viewer: Option<UserId>,
    ) -> Result<Vec<RecipeView>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<(RecipeRow, UserRow)> = recipes::table
            .inner_join(users::table)
            .order((recipes::created_at.desc(), recipes::id.desc()))
            .select((RecipeRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        let mut views = Vec::with_capacity(rows.len());
        for (recipe, author) in rows {
            views.push(assemble_view(&mut conn, recipe, author, viewer).await?);
        }
        Ok(views)
    }

    async fn list_briefs_by_author(
        &self,
        author: UserId,
    ) -> Result<Vec<RecipeBrief>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::author_id.eq(author.value()))
            .order((recipes::created_at.desc(), recipes::id.desc()))
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        rows.into_iter().map(row_to_brief).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping edge cases.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool(PoolError::checkout("connection refused"));

        assert!(matches!(err, RecipeRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn read_error_maps_to_query_error() {
        let err = map_read(diesel::result::Error::NotFound);

        assert!(matches!(err, RecipeRepositoryError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }

    #[rstest]
    fn transactional_write_error_maps_to_write_failed() {
        let err = map_write(diesel::result::Error::RollbackTransaction);

        assert!(matches!(err, RecipeRepositoryError::WriteFailed { .. }));
    }
}
