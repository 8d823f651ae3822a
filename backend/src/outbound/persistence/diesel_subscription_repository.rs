//! PostgreSQL-backed `SubscriptionRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SubscriptionRepository, SubscriptionRepositoryError};
use crate::domain::user::{User, UserId};

use super::error_mapping::{map_diesel_error, map_diesel_error_with_unique, map_pool_error};
use super::models::{NewSubscriptionRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{subscriptions, users};

/// Diesel-backed implementation of the subscription repository port.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> SubscriptionRepositoryError {
    map_pool_error(error, SubscriptionRepositoryError::connection)
}

fn map_write(error: diesel::result::Error) -> SubscriptionRepositoryError {
    map_diesel_error_with_unique(
        error,
        SubscriptionRepositoryError::query,
        SubscriptionRepositoryError::connection,
        SubscriptionRepositoryError::duplicate,
    )
}

fn map_read(error: diesel::result::Error) -> SubscriptionRepositoryError {
    map_diesel_error(
        error,
        SubscriptionRepositoryError::query,
        SubscriptionRepositoryError::connection,
    )
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn insert(
        &self,
        user: UserId,
        author: UserId,
    ) -> Result<(), SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(subscriptions::table)
            .values(&NewSubscriptionRow {
                user_id: user.value(),
                author_id: author.value(),
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_write)
    }

    async fn delete(
        &self,
        user: UserId,
        author: UserId,
    ) -> Result<bool, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(
            subscriptions::table.filter(
                subscriptions::user_id
                    .eq(user.value())
                    .and(subscriptions::author_id.eq(author.value())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_write)?;

        Ok(deleted > 0)
    }

    async fn exists(
        &self,
        user: UserId,
        author: UserId,
    ) -> Result<bool, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::select(diesel::dsl::exists(
            subscriptions::table.filter(
                subscriptions::user_id
                    .eq(user.value())
                    .and(subscriptions::author_id.eq(author.value())),
            ),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_read)
    }

    async fn list_authors(&self, user: UserId) -> Result<Vec<User>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<UserRow> = subscriptions::table
            .inner_join(users::table.on(users::id.eq(subscriptions::author_id)))
            .filter(subscriptions::user_id.eq(user.value()))
            .order(subscriptions::id.desc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        rows.into_iter()
            .map(|row| row.into_user().map_err(SubscriptionRepositoryError::query))
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
        assert!(matches!(err, SubscriptionRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn generic_diesel_error_maps_to_query_error() {
        let err = map_write(diesel::result::Error::NotFound);
        assert!(matches!(err, SubscriptionRepositoryError::Query { .. }));
    }
}
