use crate::api::controllers::dto::size_dto::{SizeDTO, SizeRequest};
use crate::api::errors::APIError;
use crate::api::extractors::ValidatedJson;
use crate::api::response::paged;
use crate::api::state::AppState;
use crate::data::repos::implementors::size_repo::SizeRepo;
use crate::data::repos::traits::repository::{PageParams, Repository};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// List sizes
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let repo = SizeRepo::new(state.db);

    match repo.get_page(params.into()).await {
        Ok((sizes, total)) => {
            let dtos: Vec<SizeDTO> = sizes.into_iter().map(SizeDTO::from).collect();
            paged(dtos, total)
        }
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Create a size
pub async fn store(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SizeRequest>,
) -> impl IntoResponse {
    let repo = SizeRepo::new(state.db);

    match repo.add(request.into()).await {
        Ok(size) => (StatusCode::OK, Json(SizeDTO::from(size))).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Replace a size's fields
pub async fn update(
    State(state): State<AppState>,
    Path(size_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<SizeRequest>,
) -> impl IntoResponse {
    let repo = SizeRepo::new(state.db);

    match repo.update(size_id, request.into()).await {
        Ok(Some(size)) => (StatusCode::OK, Json(SizeDTO::from(size))).into_response(),
        Ok(None) => APIError::NotFound("Size").into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}
