//! Favorite toggle handlers.
//!
//! ```text
//! POST   /api/v1/recipes/{id}/favorite
//! DELETE /api/v1/recipes/{id}/favorite
//! ```

use actix_web::{delete, post, web, HttpResponse};

use crate::domain::recipe::RecipeId;
use crate::domain::Error;
use crate::inbound::http::recipes_dto::RecipeBriefDto;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Add a recipe to the user's favorites.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/favorite",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 201, description = "Recipe favorited", body = RecipeBriefDto),
        (status = 404, description = "Recipe not found", body = Error),
        (status = 409, description = "Already favorited", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "addFavorite"
)]
#[post("/recipes/{id}/favorite")]
pub async fn add_favorite(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let brief = state
        .favorites
        .add_favorite(user, RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(RecipeBriefDto::from(&brief)))
}

/// Remove a recipe from the user's favorites.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/favorite",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Favorite removed"),
        (status = 404, description = "Not favorited", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "removeFavorite"
)]
#[delete("/recipes/{id}/favorite")]
pub async fn remove_favorite(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    state
        .favorites
        .remove_favorite(user, RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
