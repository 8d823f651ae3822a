//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FavoriteCommand, LoginService, RecipeCommand, RecipeQuery, ReferenceDataRepository,
    ShoppingCartCommand, SubscriptionCommand, UserDirectory,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn UserDirectory>,
    pub recipe_commands: Arc<dyn RecipeCommand>,
    pub recipe_queries: Arc<dyn RecipeQuery>,
    pub favorites: Arc<dyn FavoriteCommand>,
    pub shopping_cart: Arc<dyn ShoppingCartCommand>,
    pub subscriptions: Arc<dyn SubscriptionCommand>,
    pub reference: Arc<dyn ReferenceDataRepository>,
}
