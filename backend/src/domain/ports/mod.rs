//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod favorite_command;
mod favorite_repository;
mod image_store;
mod login_service;
mod password_hasher;
mod recipe_command;
mod recipe_query;
mod recipe_repository;
mod reference_repository;
mod shopping_cart_command;
mod shopping_cart_repository;
mod subscription_command;
mod subscription_repository;
mod user_directory;
mod user_repository;

#[cfg(test)]
pub use favorite_command::MockFavoriteCommand;
pub use favorite_command::FavoriteCommand;
#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
pub use favorite_repository::{FavoriteRepository, FavoriteRepositoryError};
#[cfg(test)]
pub use image_store::MockImageStore;
pub use image_store::{FixtureImageStore, ImageStore, ImageStoreError, StoredImage};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    FixtureLoginService, LoginCredentials, LoginService, LoginValidationError,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHasher};
#[cfg(test)]
pub use recipe_command::MockRecipeCommand;
pub use recipe_command::RecipeCommand;
#[cfg(test)]
pub use recipe_query::MockRecipeQuery;
pub use recipe_query::RecipeQuery;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use reference_repository::MockReferenceDataRepository;
pub use reference_repository::{ReferenceDataRepository, ReferenceRepositoryError};
#[cfg(test)]
pub use shopping_cart_command::MockShoppingCartCommand;
pub use shopping_cart_command::{ShoppingCartCommand, ShoppingListEntry};
#[cfg(test)]
pub use shopping_cart_repository::MockShoppingCartRepository;
pub use shopping_cart_repository::{ShoppingCartRepository, ShoppingCartRepositoryError};
#[cfg(test)]
pub use subscription_command::MockSubscriptionCommand;
pub use subscription_command::{SubscriptionCommand, SubscriptionView};
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::{SubscriptionRepository, SubscriptionRepositoryError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{RegisterUserRequest, UserDirectory};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, UserCredentials, UserRepository, UserRepositoryError};
