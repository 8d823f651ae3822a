//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; no business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never leak into the domain layer.
//! - **Strongly typed errors**: every database failure maps to the owning
//!   port's error enum; unique violations surface as typed duplicates and
//!   mid-transaction failures as rolled-back write errors.

mod diesel_favorite_repository;
mod diesel_login_service;
mod diesel_recipe_repository;
mod diesel_reference_repository;
mod diesel_shopping_cart_repository;
mod diesel_subscription_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_reference_repository::DieselReferenceRepository;
pub use diesel_shopping_cart_repository::DieselShoppingCartRepository;
pub use diesel_subscription_repository::DieselSubscriptionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{run_pending_migrations, MigrationError};
pub use pool::{DbPool, PoolConfig, PoolError};
