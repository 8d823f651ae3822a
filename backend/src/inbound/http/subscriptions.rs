//! Subscription handlers.
//!
//! ```text
//! GET    /api/v1/users/subscriptions
//! POST   /api/v1/users/{id}/subscribe
//! DELETE /api/v1/users/{id}/subscribe
//! ```

use actix_web::{delete, get, post, web, HttpResponse};

use crate::domain::user::UserId;
use crate::domain::Error;
use crate::inbound::http::recipes_dto::SubscriptionDto;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Authors the user subscribes to, each with their recipes.
#[utoipa::path(
    get,
    path = "/api/v1/users/subscriptions",
    responses(
        (status = 200, description = "Subscriptions", body = [SubscriptionDto]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["subscriptions"],
    operation_id = "listSubscriptions"
)]
#[get("/users/subscriptions")]
pub async fn list_subscriptions(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<SubscriptionDto>>> {
    let user = session.require_user_id()?;
    let views = state.subscriptions.list_subscriptions(user).await?;
    Ok(web::Json(views.iter().map(SubscriptionDto::from).collect()))
}

/// Subscribe to an author.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/subscribe",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionDto),
        (status = 400, description = "Self subscription", body = Error),
        (status = 404, description = "Author not found", body = Error),
        (status = 409, description = "Already subscribed", body = Error)
    ),
    tags = ["subscriptions"],
    operation_id = "subscribe"
)]
#[post("/users/{id}/subscribe")]
pub async fn subscribe(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let view = state
        .subscriptions
        .subscribe(user, UserId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(SubscriptionDto::from(&view)))
}

/// Unsubscribe from an author.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/subscribe",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 404, description = "Not subscribed", body = Error)
    ),
    tags = ["subscriptions"],
    operation_id = "unsubscribe"
)]
#[delete("/users/{id}/subscribe")]
pub async fn unsubscribe(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    state
        .subscriptions
        .unsubscribe(user, UserId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
