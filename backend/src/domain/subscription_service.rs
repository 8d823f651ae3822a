//! Subscription domain service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    RecipeRepository, SubscriptionCommand, SubscriptionRepository, SubscriptionRepositoryError,
    SubscriptionView, UserRepository, UserRepositoryError,
};
use crate::domain::recipe_service::map_recipe_repository_error;
use crate::domain::user::{User, UserId};
use crate::domain::Error;

fn map_subscription_repository_error(error: SubscriptionRepositoryError) -> Error {
    match error {
        SubscriptionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("subscription repository unavailable: {message}"))
        }
        SubscriptionRepositoryError::Query { message } => {
            Error::internal(format!("subscription repository error: {message}"))
        }
        SubscriptionRepositoryError::Duplicate { .. } => {
            Error::conflict("already subscribed to this author")
                .with_details(json!({ "code": "already_exists" }))
        }
    }
}

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { .. } => {
            Error::conflict("a user with this email already exists")
                .with_details(json!({ "code": "duplicate_email" }))
        }
        UserRepositoryError::DuplicateUsername { .. } => {
            Error::conflict("a user with this username already exists")
                .with_details(json!({ "code": "duplicate_username" }))
        }
    }
}

/// Subscription service implementing the subscription driving port.
#[derive(Clone)]
pub struct SubscriptionService<S, U, R> {
    subscriptions: Arc<S>,
    users: Arc<U>,
    recipes: Arc<R>,
}

impl<S, U, R> SubscriptionService<S, U, R>
where
    S: SubscriptionRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    /// Create a new service over the subscription, user, and recipe ports.
    pub fn new(subscriptions: Arc<S>, users: Arc<U>, recipes: Arc<R>) -> Self {
        Self {
            subscriptions,
            users,
            recipes,
        }
    }

    async fn build_view(&self, author: User) -> Result<SubscriptionView, Error> {
        let recipes = self
            .recipes
            .list_briefs_by_author(author.id())
            .await
            .map_err(map_recipe_repository_error)?;
        let recipes_count = recipes.len();
        Ok(SubscriptionView {
            author,
            is_subscribed: true,
            recipes,
            recipes_count,
        })
    }
}

#[async_trait]
impl<S, U, R> SubscriptionCommand for SubscriptionService<S, U, R>
where
    S: SubscriptionRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    async fn subscribe(&self, user: UserId, author: UserId) -> Result<SubscriptionView, Error> {
        // The self-subscription rule is checked before the duplicate check.
        if user == author {
            return Err(Error::invalid_request("cannot subscribe to yourself")
                .with_details(json!({ "code": "self_subscription" })));
        }

        let author_row = self
            .users
            .find_by_id(author)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {author} not found")))?;

        self.subscriptions
            .insert(user, author)
            .await
            .map_err(map_subscription_repository_error)?;

        self.build_view(author_row).await
    }

    async fn unsubscribe(&self, user: UserId, author: UserId) -> Result<(), Error> {
        let removed = self
            .subscriptions
            .delete(user, author)
            .await
            .map_err(map_subscription_repository_error)?;
        if !removed {
            return Err(Error::not_found("not subscribed to this author"));
        }
        Ok(())
    }

    async fn list_subscriptions(&self, user: UserId) -> Result<Vec<SubscriptionView>, Error> {
        let authors = self
            .subscriptions
            .list_authors(user)
            .await
            .map_err(map_subscription_repository_error)?;

        let mut views = Vec::with_capacity(authors.len());
        for author in authors {
            views.push(self.build_view(author).await?);
        }
        Ok(views)
    }
}
