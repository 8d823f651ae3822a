//! Domain entities, validation, services, and ports.
//!
//! Everything here is transport and storage agnostic. Inbound adapters map
//! [`Error`] values to protocol envelopes; outbound adapters implement the
//! traits under [`ports`].

mod account_service;
pub mod error;
mod favorite_service;
pub mod ingredient;
pub mod ports;
pub mod recipe;
mod recipe_service;
mod shopping_cart_service;
mod subscription_service;
pub mod tag;
pub mod user;

pub use self::account_service::AccountService;
pub use self::error::{Error, ErrorCode};
pub use self::favorite_service::FavoriteService;
pub use self::ingredient::{Ingredient, IngredientId, IngredientValidationError};
pub use self::recipe::{
    validate, AuthorView, CookingTime, IngredientAmount, IngredientDraft, MeasuredIngredient,
    RecipeBrief, RecipeDraft, RecipeId, RecipeValidationError, RecipeView, ReferenceSnapshot,
    ValidatedRecipe,
};
pub use self::recipe_service::RecipeService;
pub use self::shopping_cart_service::ShoppingCartService;
pub use self::subscription_service::SubscriptionService;
pub use self::tag::{Tag, TagColor, TagId, TagSlug, TagValidationError};
pub use self::user::{EmailAddress, User, UserId, Username, UserValidationError};

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;
