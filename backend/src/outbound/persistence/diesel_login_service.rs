//! Diesel-backed `LoginService` adapter.
//!
//! Looks the account up by email through the user repository and checks
//! the password against the stored hash. A missing account and a wrong
//! password produce the same error so the response does not leak which
//! emails are registered.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LoginCredentials, LoginService, PasswordHasher, UserRepository};
use crate::domain::user::User;
use crate::domain::Error;

use super::diesel_user_repository::DieselUserRepository;

fn map_lookup_error(error: crate::domain::ports::UserRepositoryError) -> Error {
    use crate::domain::ports::UserRepositoryError;

    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("credential lookup failed: {other}")),
    }
}

/// Diesel-backed `LoginService` verifying passwords through a hasher port.
#[derive(Clone)]
pub struct DieselLoginService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl DieselLoginService {
    /// Create a new service backed by a Diesel user repository.
    pub fn new(users: DieselUserRepository, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            users: Arc::new(users),
            hasher,
        }
    }

    #[cfg(test)]
    fn from_repository(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let stored = self
            .users
            .find_credentials_by_email(credentials.email())
            .await
            .map_err(map_lookup_error)?;

        let Some(stored) = stored else {
            return Err(Error::unauthorized("invalid credentials"));
        };

        if !self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
        {
            return Err(Error::unauthorized("invalid credentials"));
        }

        Ok(stored.user)
    }
}
