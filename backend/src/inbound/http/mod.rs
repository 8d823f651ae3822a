//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod favorites;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod recipes_dto;
pub mod session;
pub mod shopping_cart;
pub mod state;
pub mod subscriptions;
pub mod tags;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api/v1` endpoint.
///
/// Ordering matters for the routes that share a prefix with a path
/// parameter: `users/me`, `users/subscriptions`, and
/// `recipes/download_shopping_cart` must be registered before their
/// `{id}` siblings.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(subscriptions::list_subscriptions)
        .service(subscriptions::subscribe)
        .service(subscriptions::unsubscribe)
        .service(users::get_user)
        .service(tags::list_tags)
        .service(tags::get_tag)
        .service(ingredients::list_ingredients)
        .service(ingredients::get_ingredient)
        .service(shopping_cart::download_shopping_cart)
        .service(recipes::list_recipes)
        .service(recipes::create_recipe)
        .service(favorites::add_favorite)
        .service(favorites::remove_favorite)
        .service(shopping_cart::add_to_cart)
        .service(shopping_cart::remove_from_cart)
        .service(recipes::get_recipe)
        .service(recipes::update_recipe)
        .service(recipes::delete_recipe);
}
