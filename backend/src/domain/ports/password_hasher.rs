//! Port for password hashing and verification.
//!
//! Hash format and work factors are the adapter's concern; the domain only
//! needs an opaque hash string it can store and later check a password
//! against.

use crate::domain::Error;

/// Port for deriving and checking password hashes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a storable hash for the given password.
    fn hash(&self, password: &str) -> Result<String, Error>;

    /// Whether the password matches the stored hash.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Fixture hasher for tests: stores passwords behind a marker prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &str) -> Result<String, Error> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("plain:") == Some(password)
    }
}
