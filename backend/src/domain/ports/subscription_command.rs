//! Driving port for author subscriptions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::recipe::RecipeBrief;
use crate::domain::user::{User, UserId};
use crate::domain::Error;

/// A subscribed-to author with their recipes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionView {
    #[serde(flatten)]
    pub author: User,
    pub is_subscribed: bool,
    pub recipes: Vec<RecipeBrief>,
    pub recipes_count: usize,
}

/// Domain use-case port for subscribing to authors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionCommand: Send + Sync {
    /// Subscribe `user` to `author`. Self-subscription is rejected before
    /// the duplicate check; an existing pair fails with `Conflict`.
    async fn subscribe(&self, user: UserId, author: UserId) -> Result<SubscriptionView, Error>;

    /// Remove the subscription; fails with `NotFound` when absent.
    async fn unsubscribe(&self, user: UserId, author: UserId) -> Result<(), Error>;

    /// Authors the user subscribes to, each with their recipes.
    async fn list_subscriptions(&self, user: UserId) -> Result<Vec<SubscriptionView>, Error>;
}
