//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation; `diesel print-schema` can regenerate them from a live
//! database after a migration changes the schema.

diesel::table! {
    /// Registered accounts. `email` and `username` carry unique indexes.
    users (id) {
        id -> Int8,
        email -> Varchar,
        username -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tag reference data. `name`, `slug`, and `color` are each unique.
    tags (id) {
        id -> Int8,
        name -> Varchar,
        slug -> Varchar,
        color -> Varchar,
    }
}

diesel::table! {
    /// Ingredient reference data, unique on `name`.
    ingredients (id) {
        id -> Int8,
        name -> Varchar,
        measurement_unit -> Varchar,
    }
}

diesel::table! {
    /// Recipes; `author_id` cascades deletes from users.
    recipes (id) {
        id -> Int8,
        author_id -> Int8,
        name -> Varchar,
        image_url -> Text,
        text -> Text,
        cooking_time -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ingredient link rows, unique on (recipe_id, ingredient_id);
    /// `amount` carries a CHECK (amount >= 1).
    recipe_ingredients (id) {
        id -> Int8,
        recipe_id -> Int8,
        ingredient_id -> Int8,
        amount -> Int4,
    }
}

diesel::table! {
    /// Tag join rows, unique on (recipe_id, tag_id).
    recipe_tags (id) {
        id -> Int8,
        recipe_id -> Int8,
        tag_id -> Int8,
    }
}

diesel::table! {
    /// Favorite pairs, unique on (user_id, recipe_id).
    favorites (id) {
        id -> Int8,
        user_id -> Int8,
        recipe_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shopping cart pairs, unique on (user_id, recipe_id).
    shopping_cart_entries (id) {
        id -> Int8,
        user_id -> Int8,
        recipe_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Subscription pairs, unique on (user_id, author_id) with a CHECK
    /// forbidding user_id = author_id.
    subscriptions (id) {
        id -> Int8,
        user_id -> Int8,
        author_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(recipes -> users (author_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));
diesel::joinable!(favorites -> users (user_id));
diesel::joinable!(favorites -> recipes (recipe_id));
diesel::joinable!(shopping_cart_entries -> users (user_id));
diesel::joinable!(shopping_cart_entries -> recipes (recipe_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    tags,
    ingredients,
    recipes,
    recipe_ingredients,
    recipe_tags,
    favorites,
    shopping_cart_entries,
    subscriptions,
);
