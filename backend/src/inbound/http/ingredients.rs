//! Ingredient read handlers.
//!
//! ```text
//! GET /api/v1/ingredients?name=flo
//! GET /api/v1/ingredients/{id}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ingredient::{Ingredient, IngredientId};
use crate::domain::Error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tags::map_reference_error;
use crate::inbound::http::ApiResult;

/// Ingredient row as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngredientDto {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

impl From<&Ingredient> for IngredientDto {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id().value(),
            name: ingredient.name().to_owned(),
            measurement_unit: ingredient.measurement_unit().to_owned(),
        }
    }
}

/// Query parameters for the ingredient listing.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct IngredientFilter {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
}

/// List ingredients, optionally filtered by name prefix.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    params(IngredientFilter),
    responses((status = 200, description = "Ingredients", body = [IngredientDto])),
    tags = ["ingredients"],
    operation_id = "listIngredients",
    security([])
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    filter: web::Query<IngredientFilter>,
) -> ApiResult<web::Json<Vec<IngredientDto>>> {
    let ingredients = state
        .reference
        .list_ingredients(filter.name.as_deref())
        .await
        .map_err(map_reference_error)?;
    Ok(web::Json(
        ingredients.iter().map(IngredientDto::from).collect(),
    ))
}

/// Fetch one ingredient.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientDto),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "getIngredient",
    security([])
)]
#[get("/ingredients/{id}")]
pub async fn get_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<IngredientDto>> {
    let id = IngredientId::new(path.into_inner());
    let ingredient = state
        .reference
        .find_ingredient(id)
        .await
        .map_err(map_reference_error)?
        .ok_or_else(|| Error::not_found(format!("ingredient {id} not found")))?;
    Ok(web::Json(IngredientDto::from(&ingredient)))
}
