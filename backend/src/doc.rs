//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every HTTP endpoint from the inbound layer, the wire
//! DTOs, and the session cookie security scheme. The generated document
//! backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::ShoppingListEntry;
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::ingredients::IngredientDto;
use crate::inbound::http::recipes_dto::{
    AuthorDto, RecipeBriefDto, RecipeDto, RecipeIngredientDto, RecipeIngredientRequest,
    RecipeRequest, SubscriptionDto, TagDto, UserDto,
};
use crate::inbound::http::users::{LoginRequest, RegisterRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe sharing backend API",
        description = "HTTP interface for recipes, favorites, shopping carts, and subscriptions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::subscriptions::list_subscriptions,
        crate::inbound::http::subscriptions::subscribe,
        crate::inbound::http::subscriptions::unsubscribe,
        crate::inbound::http::tags::list_tags,
        crate::inbound::http::tags::get_tag,
        crate::inbound::http::ingredients::list_ingredients,
        crate::inbound::http::ingredients::get_ingredient,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::favorites::add_favorite,
        crate::inbound::http::favorites::remove_favorite,
        crate::inbound::http::shopping_cart::add_to_cart,
        crate::inbound::http::shopping_cart::remove_from_cart,
        crate::inbound::http::shopping_cart::download_shopping_cart,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RecipeRequest,
        RecipeIngredientRequest,
        RecipeDto,
        RecipeBriefDto,
        RecipeIngredientDto,
        TagDto,
        UserDto,
        AuthorDto,
        SubscriptionDto,
        IngredientDto,
        RegisterRequest,
        LoginRequest,
        ShoppingListEntry,
    )),
    tags(
        (name = "users", description = "Accounts and sessions"),
        (name = "recipes", description = "Recipe reads and writes"),
        (name = "favorites", description = "Favorite toggle"),
        (name = "shopping-cart", description = "Cart toggle and shopping list"),
        (name = "subscriptions", description = "Author subscriptions"),
        (name = "tags", description = "Tag reference data"),
        (name = "ingredients", description = "Ingredient reference data"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
