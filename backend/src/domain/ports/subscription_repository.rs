//! Port for subscription pair persistence.

use async_trait::async_trait;

use crate::domain::user::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by subscription repository adapters.
    pub enum SubscriptionRepositoryError {
        /// Repository connection could not be established.
        Connection => "subscription repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "subscription repository query failed: {message}",
        /// The (user, author) pair is already stored.
        Duplicate => "subscription already exists: {message}",
    }
}

/// Port for subscriber/author pairs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert the pair; fails with `Duplicate` when already present.
    async fn insert(
        &self,
        user: UserId,
        author: UserId,
    ) -> Result<(), SubscriptionRepositoryError>;

    /// Delete the pair. Returns whether a row was removed.
    async fn delete(
        &self,
        user: UserId,
        author: UserId,
    ) -> Result<bool, SubscriptionRepositoryError>;

    /// Whether the pair exists.
    async fn exists(
        &self,
        user: UserId,
        author: UserId,
    ) -> Result<bool, SubscriptionRepositoryError>;

    /// Authors the user subscribes to, newest subscription first.
    async fn list_authors(&self, user: UserId) -> Result<Vec<User>, SubscriptionRepositoryError>;
}
