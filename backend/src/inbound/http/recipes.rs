//! Recipe API handlers.
//!
//! ```text
//! GET    /api/v1/recipes
//! POST   /api/v1/recipes
//! GET    /api/v1/recipes/{id}
//! PATCH  /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! ```

use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::domain::recipe::{RecipeDraft, RecipeId};
use crate::domain::Error;
use crate::inbound::http::recipes_dto::{RecipeDto, RecipeRequest};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List all recipes with per-viewer flags.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    responses(
        (status = 200, description = "Recipes", body = [RecipeDto]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes",
    security([])
)]
#[get("/recipes")]
pub async fn list_recipes(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RecipeDto>>> {
    let viewer = session.user_id()?;
    let views = state.recipe_queries.list_recipes(viewer).await?;
    Ok(web::Json(views.iter().map(RecipeDto::from).collect()))
}

/// Fetch one recipe.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = RecipeDto),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe",
    security([])
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<RecipeDto>> {
    let viewer = session.user_id()?;
    let view = state
        .recipe_queries
        .get_recipe(RecipeId::new(path.into_inner()), viewer)
        .await?;
    Ok(web::Json(RecipeDto::from(&view)))
}

/// Create a recipe owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeDto),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let draft = RecipeDraft::from(payload.into_inner());
    let view = state.recipe_commands.create_recipe(author, draft).await?;
    Ok(HttpResponse::Created().json(RecipeDto::from(&view)))
}

/// Update a recipe; author only, links replaced in full.
#[utoipa::path(
    patch,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeDto),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[patch("/recipes/{id}")]
pub async fn update_recipe(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeDto>> {
    let caller = session.require_user_id()?;
    let draft = RecipeDraft::from(payload.into_inner());
    let view = state
        .recipe_commands
        .update_recipe(RecipeId::new(path.into_inner()), caller, draft)
        .await?;
    Ok(web::Json(RecipeDto::from(&view)))
}

/// Delete a recipe; author only.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    state
        .recipe_commands
        .delete_recipe(RecipeId::new(path.into_inner()), caller)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    //! Handler coverage over mocked driving ports.
    use super::*;
    use crate::domain::ports::{MockRecipeCommand, MockRecipeQuery};
    use crate::domain::recipe::{AuthorView, CookingTime, RecipeView};
    use crate::domain::user::{EmailAddress, User, UserId, Username};
    use crate::inbound::http::test_utils::{test_app_with_state, test_state, login_session};
    use actix_web::{http::StatusCode, test as actix_test};
    use serde_json::Value;

    fn sample_view() -> RecipeView {
        RecipeView {
            id: RecipeId::new(10),
            name: "Porridge".to_owned(),
            text: "Stir and wait.".to_owned(),
            cooking_time: CookingTime::new(10).expect("valid time"),
            image_url: "/media/recipes/abc.png".to_owned(),
            author: AuthorView {
                user: User::new(
                    UserId::new(1),
                    EmailAddress::new("ada@example.org").expect("valid email"),
                    Username::new("ada").expect("valid username"),
                    "Ada",
                    "Lovelace",
                )
                .expect("valid user"),
                is_subscribed: false,
            },
            tags: Vec::new(),
            ingredients: Vec::new(),
            is_favorited: false,
            is_in_shopping_cart: false,
        }
    }

    #[actix_web::test]
    async fn list_serialises_views() {
        let mut queries = MockRecipeQuery::new();
        queries
            .expect_list_recipes()
            .returning(|_| Ok(vec![sample_view()]));
        let mut state = test_state();
        state.recipe_queries = std::sync::Arc::new(queries);

        let app = actix_test::init_service(test_app_with_state(state)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/recipes")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(res).await).expect("json body");
        assert_eq!(body[0]["name"], "Porridge");
        assert_eq!(body[0]["author"]["username"], "ada");
        assert_eq!(body[0]["is_favorited"], false);
    }

    #[actix_web::test]
    async fn create_requires_a_session() {
        let app = actix_test::init_service(test_app_with_state(test_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/recipes")
                .set_json(serde_json::json!({}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn create_returns_created_recipe() {
        let mut commands = MockRecipeCommand::new();
        commands
            .expect_create_recipe()
            .returning(|_, _| Ok(sample_view()));
        let mut state = test_state();
        state.recipe_commands = std::sync::Arc::new(commands);

        let app = actix_test::init_service(test_app_with_state(state)).await;
        let cookie = login_session(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/recipes")
                .cookie(cookie)
                .set_json(serde_json::json!({
                    "name": "Porridge",
                    "text": "Stir.",
                    "cooking_time": 10,
                    "image": "data:image/png;base64,aGk=",
                    "tags": [1],
                    "ingredients": [{ "id": 1, "amount": 2 }],
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(res).await).expect("json body");
        assert_eq!(body["id"], 10);
    }
}
