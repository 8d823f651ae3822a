//! Behaviour coverage for cart toggling and ingredient aggregation.

use std::sync::Arc;

use rstest::rstest;

use crate::domain::ingredient::{Ingredient, IngredientId};
use crate::domain::ports::{
    MockRecipeRepository, MockShoppingCartRepository, ShoppingCartCommand,
    ShoppingCartRepositoryError,
};
use crate::domain::recipe::{CookingTime, IngredientAmount, MeasuredIngredient, RecipeBrief, RecipeId};
use crate::domain::user::UserId;
use crate::domain::ErrorCode;

use super::ShoppingCartService;

fn link(id: i64, name: &str, unit: &str, amount: i32) -> MeasuredIngredient {
    MeasuredIngredient {
        ingredient: Ingredient::new(IngredientId::new(id), name, unit).expect("valid ingredient"),
        amount: IngredientAmount::new(amount).expect("valid amount"),
    }
}

fn brief(id: i64) -> RecipeBrief {
    RecipeBrief {
        id: RecipeId::new(id),
        name: "Porridge".to_owned(),
        image_url: "/media/recipes/abc.png".to_owned(),
        cooking_time: CookingTime::new(10).expect("valid time"),
    }
}

fn service(
    cart: MockShoppingCartRepository,
    recipes: MockRecipeRepository,
) -> ShoppingCartService<MockShoppingCartRepository, MockRecipeRepository> {
    ShoppingCartService::new(Arc::new(cart), Arc::new(recipes))
}

#[rstest]
#[tokio::test]
async fn aggregation_sums_shared_ingredients() {
    // Two recipes both use ingredient 1 (amounts 2 and 3); the list must
    // carry one row with the additive total.
    let mut cart = MockShoppingCartRepository::new();
    cart.expect_load_cart_ingredients().returning(|_| {
        Ok(vec![
            link(1, "flour", "g", 2),
            link(2, "milk", "ml", 200),
            link(1, "flour", "g", 3),
        ])
    });

    let list = service(cart, MockRecipeRepository::new())
        .shopping_list(UserId::new(1))
        .await
        .expect("aggregation succeeds");

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].ingredient_name, "flour");
    assert_eq!(list[0].total_amount, 5);
    assert_eq!(list[1].ingredient_name, "milk");
    assert_eq!(list[1].total_amount, 200);
}

#[rstest]
#[tokio::test]
async fn aggregation_orders_by_ingredient_id() {
    let mut cart = MockShoppingCartRepository::new();
    cart.expect_load_cart_ingredients().returning(|_| {
        Ok(vec![
            link(9, "salt", "g", 1),
            link(3, "milk", "ml", 100),
            link(7, "oats", "g", 40),
        ])
    });

    let list = service(cart, MockRecipeRepository::new())
        .shopping_list(UserId::new(1))
        .await
        .expect("aggregation succeeds");

    let names: Vec<&str> = list.iter().map(|entry| entry.ingredient_name.as_str()).collect();
    assert_eq!(names, vec!["milk", "oats", "salt"]);
}

#[rstest]
#[tokio::test]
async fn empty_cart_yields_empty_list() {
    let mut cart = MockShoppingCartRepository::new();
    cart.expect_load_cart_ingredients()
        .returning(|_| Ok(Vec::new()));

    let list = service(cart, MockRecipeRepository::new())
        .shopping_list(UserId::new(1))
        .await
        .expect("empty cart is not an error");

    assert!(list.is_empty());
}

#[rstest]
#[tokio::test]
async fn add_rejects_existing_entry_with_conflict() {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_brief()
        .returning(|_| Ok(Some(brief(10))));
    let mut cart = MockShoppingCartRepository::new();
    cart.expect_insert()
        .returning(|_, _| Err(ShoppingCartRepositoryError::duplicate("unique_cart_entry")));

    let err = service(cart, recipes)
        .add_to_cart(UserId::new(1), RecipeId::new(10))
        .await
        .expect_err("second add must fail");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn remove_of_absent_entry_is_not_found() {
    let mut cart = MockShoppingCartRepository::new();
    cart.expect_delete().returning(|_, _| Ok(false));

    let err = service(cart, MockRecipeRepository::new())
        .remove_from_cart(UserId::new(1), RecipeId::new(10))
        .await
        .expect_err("removing an absent entry must fail");

    assert_eq!(err.code(), ErrorCode::NotFound);
}
