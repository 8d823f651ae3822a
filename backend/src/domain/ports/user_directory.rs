//! Driving port for account registration and profile reads.

use async_trait::async_trait;

use crate::domain::recipe::AuthorView;
use crate::domain::user::{User, UserId};
use crate::domain::Error;

/// Raw registration input, validated by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Domain use-case port for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Validate the request, hash the password, and store the account.
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error>;

    /// One account with the viewer's subscription flag.
    async fn get_profile(&self, id: UserId, viewer: Option<UserId>) -> Result<AuthorView, Error>;
}
