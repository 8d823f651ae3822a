//! Tag read handlers.
//!
//! ```text
//! GET /api/v1/tags
//! GET /api/v1/tags/{id}
//! ```

use actix_web::{get, web};

use crate::domain::ports::ReferenceRepositoryError;
use crate::domain::tag::TagId;
use crate::domain::Error;
use crate::inbound::http::recipes_dto::TagDto;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

pub(crate) fn map_reference_error(error: ReferenceRepositoryError) -> Error {
    match error {
        ReferenceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("reference data unavailable: {message}"))
        }
        ReferenceRepositoryError::Query { message } => {
            Error::internal(format!("reference data error: {message}"))
        }
    }
}

/// List all tags.
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses((status = 200, description = "Tags", body = [TagDto])),
    tags = ["tags"],
    operation_id = "listTags",
    security([])
)]
#[get("/tags")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TagDto>>> {
    let tags = state
        .reference
        .list_tags()
        .await
        .map_err(map_reference_error)?;
    Ok(web::Json(tags.iter().map(TagDto::from).collect()))
}

/// Fetch one tag.
#[utoipa::path(
    get,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag", body = TagDto),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["tags"],
    operation_id = "getTag",
    security([])
)]
#[get("/tags/{id}")]
pub async fn get_tag(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<TagDto>> {
    let id = TagId::new(path.into_inner());
    let tag = state
        .reference
        .find_tag(id)
        .await
        .map_err(map_reference_error)?
        .ok_or_else(|| Error::not_found(format!("tag {id} not found")))?;
    Ok(web::Json(TagDto::from(&tag)))
}
