//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to turn credentials into an
//! authenticated account without knowing the backing infrastructure, which
//! keeps HTTP handler tests deterministic.

use std::fmt;

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, User, UserId, Username, UserValidationError};
use crate::domain::Error;

/// Validation errors for raw credential input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    InvalidEmail(UserValidationError),
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Shape-checked login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: String,
}

impl LoginCredentials {
    /// Validate raw email/password input into credentials.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: password.to_owned(),
        })
    }

    /// Login email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Raw password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated account.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// In-memory authenticator used by tests and fixture wiring:
/// `ada@example.org` / `password` authenticates as user 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

fn fixture_user() -> Result<User, Error> {
    let email = EmailAddress::new("ada@example.org")
        .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))?;
    let username = Username::new("ada")
        .map_err(|err| Error::internal(format!("invalid fixture username: {err}")))?;
    User::new(UserId::new(1), email, username, "Ada", "Lovelace")
        .map_err(|err| Error::internal(format!("invalid fixture user: {err}")))
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        if credentials.email().as_ref() == "ada@example.org"
            && credentials.password() == "password"
        {
            fixture_user()
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
