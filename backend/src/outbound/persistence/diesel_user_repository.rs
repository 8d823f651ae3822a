//! PostgreSQL-backed `UserRepository` implementation.
//!
//! Registration relies on the email/username unique indexes; a violation
//! is routed to the matching port variant by constraint name so the
//! service can report which field collided.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewUser, UserCredentials, UserRepository, UserRepositoryError};
use crate::domain::user::{EmailAddress, User, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, UserRepositoryError::connection)
}

fn map_read(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

/// Insert mapping: route unique violations to the field-specific variant.
fn map_insert(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        let constraint = info.constraint_name().unwrap_or_default();
        if constraint.contains("email") {
            return UserRepositoryError::duplicate_email(constraint);
        }
        if constraint.contains("username") {
            return UserRepositoryError::duplicate_username(constraint);
        }
    }
    map_read(error)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = NewUserRow {
            email: new_user.email.as_ref(),
            username: new_user.username.as_ref(),
            first_name: &new_user.first_name,
            last_name: &new_user.last_name,
            password_hash: &new_user.password_hash,
        };

        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_insert)?;

        stored.into_user().map_err(UserRepositoryError::query)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .filter(users::id.eq(id.value()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_read)?;

        row.map(|row| row.into_user().map_err(UserRepositoryError::query))
            .transpose()
    }

    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_read)?;

        row.map(|row| {
            let password_hash = row.password_hash.clone();
            let user = row.into_user().map_err(UserRepositoryError::query)?;
            Ok(UserCredentials {
                user,
                password_hash,
            })
        })
        .transpose()
    }
}
