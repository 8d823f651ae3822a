//! Wiring of ports to their production adapters.

use std::sync::Arc;

use actix_web::web;

use backend::domain::{
    AccountService, FavoriteService, RecipeService, ShoppingCartService, SubscriptionService,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::auth::Argon2PasswordHasher;
use backend::outbound::images::Base64ImageStore;
use backend::outbound::persistence::{
    DieselFavoriteRepository, DieselLoginService, DieselRecipeRepository,
    DieselReferenceRepository, DieselShoppingCartRepository, DieselSubscriptionRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Build the HTTP state over the Diesel adapters.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let pool = config.db_pool.clone();

    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let reference = Arc::new(DieselReferenceRepository::new(pool.clone()));
    let recipes = Arc::new(DieselRecipeRepository::new(pool.clone()));
    let favorites = Arc::new(DieselFavoriteRepository::new(pool.clone()));
    let cart = Arc::new(DieselShoppingCartRepository::new(pool.clone()));
    let subscriptions = Arc::new(DieselSubscriptionRepository::new(pool.clone()));
    let hasher = Arc::new(Argon2PasswordHasher);
    let images = Arc::new(
        Base64ImageStore::open(&config.media_root)
            .map_err(|err| std::io::Error::other(format!("media root unavailable: {err}")))?,
    );

    let recipe_service = Arc::new(RecipeService::new(
        recipes.clone(),
        reference.clone(),
        images,
    ));

    Ok(web::Data::new(HttpState {
        login: Arc::new(DieselLoginService::new(
            DieselUserRepository::new(pool),
            hasher.clone(),
        )),
        accounts: Arc::new(AccountService::new(
            users.clone(),
            subscriptions.clone(),
            hasher,
        )),
        recipe_commands: recipe_service.clone(),
        recipe_queries: recipe_service,
        favorites: Arc::new(FavoriteService::new(favorites, recipes.clone())),
        shopping_cart: Arc::new(ShoppingCartService::new(cart, recipes.clone())),
        subscriptions: Arc::new(SubscriptionService::new(subscriptions, users, recipes)),
        reference,
    }))
}
