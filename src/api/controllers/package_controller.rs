use crate::api::controllers::dto::package_dto::{PackageDTO, PackageRequest};
use crate::api::errors::APIError;
use crate::api::extractors::ValidatedJson;
use crate::api::response::paged;
use crate::api::state::AppState;
use crate::data::repos::implementors::package_repo::PackageRepo;
use crate::data::repos::traits::repository::{PageParams, Repository};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// List packages
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let repo = PackageRepo::new(state.db);

    match repo.get_page(params.into()).await {
        Ok((packages, total)) => {
            let dtos: Vec<PackageDTO> = packages.into_iter().map(PackageDTO::from).collect();
            paged(dtos, total)
        }
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Create a package
pub async fn store(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PackageRequest>,
) -> impl IntoResponse {
    let repo = PackageRepo::new(state.db);

    match repo.add(request.into()).await {
        Ok(package) => (StatusCode::OK, Json(PackageDTO::from(package))).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Replace a package's fields
pub async fn update(
    State(state): State<AppState>,
    Path(package_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<PackageRequest>,
) -> impl IntoResponse {
    let repo = PackageRepo::new(state.db);

    match repo.update(package_id, request.into()).await {
        Ok(Some(package)) => (StatusCode::OK, Json(PackageDTO::from(package))).into_response(),
        Ok(None) => APIError::NotFound("Package").into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}
