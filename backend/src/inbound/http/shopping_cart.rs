//! Shopping cart handlers: the toggle and the downloadable list.
//!
//! ```text
//! POST   /api/v1/recipes/{id}/shopping_cart
//! DELETE /api/v1/recipes/{id}/shopping_cart
//! GET    /api/v1/recipes/download_shopping_cart
//! ```

use actix_web::http::header;
use actix_web::{delete, get, post, web, HttpResponse};

use crate::domain::ports::ShoppingListEntry;
use crate::domain::recipe::RecipeId;
use crate::domain::Error;
use crate::inbound::http::recipes_dto::RecipeBriefDto;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Add a recipe to the user's cart.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/shopping_cart",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 201, description = "Recipe added to cart", body = RecipeBriefDto),
        (status = 404, description = "Recipe not found", body = Error),
        (status = 409, description = "Already in cart", body = Error)
    ),
    tags = ["shopping-cart"],
    operation_id = "addToCart"
)]
#[post("/recipes/{id}/shopping_cart")]
pub async fn add_to_cart(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let brief = state
        .shopping_cart
        .add_to_cart(user, RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(RecipeBriefDto::from(&brief)))
}

/// Remove a recipe from the user's cart.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/shopping_cart",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Cart entry removed"),
        (status = 404, description = "Not in cart", body = Error)
    ),
    tags = ["shopping-cart"],
    operation_id = "removeFromCart"
)]
#[delete("/recipes/{id}/shopping_cart")]
pub async fn remove_from_cart(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    state
        .shopping_cart
        .remove_from_cart(user, RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Render the aggregated list as a plain text download.
pub(crate) fn render_shopping_list(entries: &[ShoppingListEntry]) -> String {
    let mut text = String::from("Shopping list\n\n");
    for entry in entries {
        text.push_str(&format!(
            "{} ({}): {}\n",
            entry.ingredient_name, entry.measurement_unit, entry.total_amount
        ));
    }
    text
}

/// Download the deduplicated, summed shopping list.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/download_shopping_cart",
    responses(
        (status = 200, description = "Plain text shopping list", content_type = "text/plain"),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["shopping-cart"],
    operation_id = "downloadShoppingCart"
)]
#[get("/recipes/download_shopping_cart")]
pub async fn download_shopping_cart(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let entries = state.shopping_cart.shopping_list(user).await?;

    Ok(HttpResponse::Ok()
        .insert_header(header::ContentType::plaintext())
        .insert_header((
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"shopping_list.txt\"",
        ))
        .body(render_shopping_list(&entries)))
}
