//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain; repositories convert them into validated
//! domain values at the boundary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ingredient::{Ingredient, IngredientId};
use crate::domain::tag::{Tag, TagColor, TagId, TagSlug};
use crate::domain::user::{EmailAddress, User, UserId, Username};

use super::schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_cart_entries,
    subscriptions, tags, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    #[expect(dead_code, reason = "schema field read for future audit support")]
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert the row into a validated domain user, dropping the hash.
    pub(crate) fn into_user(self) -> Result<User, String> {
        let email = EmailAddress::new(self.email).map_err(|err| err.to_string())?;
        let username = Username::new(self.username).map_err(|err| err.to_string())?;
        User::new(
            UserId::new(self.id),
            email,
            username,
            self.first_name,
            self.last_name,
        )
        .map_err(|err| err.to_string())
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the tags table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TagRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub color: String,
}

impl TagRow {
    /// Convert the row into a validated domain tag.
    pub(crate) fn into_tag(self) -> Result<Tag, String> {
        let slug = TagSlug::new(self.slug).map_err(|err| err.to_string())?;
        let color = TagColor::new(self.color).map_err(|err| err.to_string())?;
        Tag::new(TagId::new(self.id), self.name, slug, color).map_err(|err| err.to_string())
    }
}

/// Row struct for reading from the ingredients table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

impl IngredientRow {
    /// Convert the row into a validated domain ingredient.
    pub(crate) fn into_ingredient(self) -> Result<Ingredient, String> {
        Ingredient::new(IngredientId::new(self.id), self.name, self.measurement_unit)
            .map_err(|err| err.to_string())
    }
}

/// Row struct for reading from the recipes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub image_url: String,
    pub text: String,
    pub cooking_time: i32,
    #[expect(dead_code, reason = "schema field read for newest-first ordering")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new recipe records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub author_id: i64,
    pub name: &'a str,
    pub image_url: &'a str,
    pub text: &'a str,
    pub cooking_time: i32,
}

/// Changeset struct for replacing a recipe's own columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeUpdate<'a> {
    pub name: &'a str,
    pub image_url: &'a str,
    pub text: &'a str,
    pub cooking_time: i32,
}

/// Insertable struct for ingredient link rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipe_ingredients)]
pub(crate) struct NewRecipeIngredientRow {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub amount: i32,
}

/// Insertable struct for tag join rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipe_tags)]
pub(crate) struct NewRecipeTagRow {
    pub recipe_id: i64,
    pub tag_id: i64,
}

/// Insertable struct for favorite pairs.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = favorites)]
pub(crate) struct NewFavoriteRow {
    pub user_id: i64,
    pub recipe_id: i64,
}

/// Insertable struct for shopping cart pairs.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shopping_cart_entries)]
pub(crate) struct NewShoppingCartRow {
    pub user_id: i64,
    pub recipe_id: i64,
}

/// Insertable struct for subscription pairs.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscriptions)]
pub(crate) struct NewSubscriptionRow {
    pub user_id: i64,
    pub author_id: i64,
}
