//! Account domain service: registration and profile reads.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    NewUser, PasswordHasher, RegisterUserRequest, SubscriptionRepository,
    SubscriptionRepositoryError, UserDirectory, UserRepository,
};
use crate::domain::recipe::AuthorView;
use crate::domain::subscription_service::map_user_repository_error;
use crate::domain::user::{EmailAddress, User, UserId, Username, UserValidationError};
use crate::domain::Error;

fn map_account_validation_error(field: &'static str, error: UserValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_field",
    }))
}

fn map_subscription_lookup_error(error: SubscriptionRepositoryError) -> Error {
    match error {
        SubscriptionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("subscription repository unavailable: {message}"))
        }
        other => Error::internal(format!("subscription lookup failed: {other}")),
    }
}

/// Account service implementing the user directory driving port.
#[derive(Clone)]
pub struct AccountService<U, S, H> {
    users: Arc<U>,
    subscriptions: Arc<S>,
    hasher: Arc<H>,
}

impl<U, S, H> AccountService<U, S, H>
where
    U: UserRepository,
    S: SubscriptionRepository,
    H: PasswordHasher,
{
    /// Create a new service over the user, subscription, and hasher ports.
    pub fn new(users: Arc<U>, subscriptions: Arc<S>, hasher: Arc<H>) -> Self {
        Self {
            users,
            subscriptions,
            hasher,
        }
    }
}

#[async_trait]
impl<U, S, H> UserDirectory for AccountService<U, S, H>
where
    U: UserRepository,
    S: SubscriptionRepository,
    H: PasswordHasher,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error> {
        let email = EmailAddress::new(request.email)
            .map_err(|err| map_account_validation_error("email", err))?;
        let username = Username::new(request.username)
            .map_err(|err| map_account_validation_error("username", err))?;
        if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
            return Err(Error::invalid_request("first and last name are required")
                .with_details(json!({ "code": "invalid_field" })));
        }
        if request.password.is_empty() {
            return Err(Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "invalid_field" })));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let new_user = NewUser {
            email,
            username,
            first_name: request.first_name,
            last_name: request.last_name,
            password_hash,
        };

        self.users
            .insert(&new_user)
            .await
            .map_err(map_user_repository_error)
    }

    async fn get_profile(&self, id: UserId, viewer: Option<UserId>) -> Result<AuthorView, Error> {
        let user = self
            .users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;

        let is_subscribed = match viewer {
            Some(viewer) if viewer != id => self
                .subscriptions
                .exists(viewer, id)
                .await
                .map_err(map_subscription_lookup_error)?,
            _ => false,
        };

        Ok(AuthorView {
            user,
            is_subscribed,
        })
    }
}
