//! PostgreSQL-backed `ReferenceDataRepository` implementation.
//!
//! Pure read adapter over the tags and ingredients tables. `resolve_*`
//! return whatever subset of the requested ids exists; the validator turns
//! count mismatches into its existence errors.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ingredient::{Ingredient, IngredientId};
use crate::domain::ports::{ReferenceDataRepository, ReferenceRepositoryError};
use crate::domain::tag::{Tag, TagId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{IngredientRow, TagRow};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, tags};

/// Diesel-backed implementation of the reference data port.
#[derive(Clone)]
pub struct DieselReferenceRepository {
    pool: DbPool,
}

impl DieselReferenceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ReferenceRepositoryError {
    map_pool_error(error, ReferenceRepositoryError::connection)
}

fn map_read(error: diesel::result::Error) -> ReferenceRepositoryError {
    map_diesel_error(
        error,
        ReferenceRepositoryError::query,
        ReferenceRepositoryError::connection,
    )
}

fn rows_to_tags(rows: Vec<TagRow>) -> Result<Vec<Tag>, ReferenceRepositoryError> {
    rows.into_iter()
        .map(|row| row.into_tag().map_err(ReferenceRepositoryError::query))
        .collect()
}

fn rows_to_ingredients(
    rows: Vec<IngredientRow>,
) -> Result<Vec<Ingredient>, ReferenceRepositoryError> {
    rows.into_iter()
        .map(|row| {
            row.into_ingredient()
                .map_err(ReferenceRepositoryError::query)
        })
        .collect()
}

#[async_trait]
impl ReferenceDataRepository for DieselReferenceRepository {
    async fn resolve_tags(&self, ids: &[TagId]) -> Result<Vec<Tag>, ReferenceRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.value()).collect();

        let rows: Vec<TagRow> = tags::table
            .filter(tags::id.eq_any(raw_ids))
            .order(tags::id.asc())
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        rows_to_tags(rows)
    }

    async fn resolve_ingredients(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, ReferenceRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.value()).collect();

        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::id.eq_any(raw_ids))
            .order(ingredients::id.asc())
            .select(IngredientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        rows_to_ingredients(rows)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ReferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<TagRow> = tags::table
            .order(tags::id.asc())
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        rows_to_tags(rows)
    }

    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, ReferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = tags::table
            .filter(tags::id.eq(id.value()))
            .select(TagRow::as_select())
            .first::<TagRow>(&mut conn)
            .await
            .optional()
            .map_err(map_read)?;

        row.map(|row| row.into_tag().map_err(ReferenceRepositoryError::query))
            .transpose()
    }

    async fn list_ingredients<'a>(
        &self,
        name_prefix: Option<&'a str>,
    ) -> Result<Vec<Ingredient>, ReferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let mut query = ingredients::table
            .select(IngredientRow::as_select())
            .into_boxed();
        if let Some(prefix) = name_prefix {
            let pattern = format!("{}%", prefix_escape(prefix));
            query = query.filter(ingredients::name.ilike(pattern));
        }

        let rows: Vec<IngredientRow> = query
            .order(ingredients::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        rows_to_ingredients(rows)
    }

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, ReferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = ingredients::table
            .filter(ingredients::id.eq(id.value()))
            .select(IngredientRow::as_select())
            .first::<IngredientRow>(&mut conn)
            .await
            .optional()
            .map_err(map_read)?;

        row.map(|row| {
            row.into_ingredient()
                .map_err(ReferenceRepositoryError::query)
        })
        .transpose()
    }
}

/// Escape LIKE metacharacters so a user-supplied prefix matches literally.
fn prefix_escape(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for ch in prefix.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    //! Regression coverage for prefix escaping and error mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("flour", "flour")]
    #[case("50%", "50\\%")]
    #[case("a_b", "a\\_b")]
    #[case("back\\slash", "back\\\\slash")]
    fn prefix_escaping(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(prefix_escape(raw), expected);
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool(PoolError::checkout("connection refused"));
        assert!(matches!(err, ReferenceRepositoryError::Connection { .. }));
    }
}
