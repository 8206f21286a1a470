use crate::api::controllers::dto::product_dto::{ProductImageRequest, ProductRequest};
use crate::api::errors::APIError;
use crate::api::extractors::ValidatedJson;
use crate::api::response::paged;
use crate::api::state::AppState;
use crate::data::repos::traits::repository::PageParams;
use crate::services::product_service::ProductService;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// List products with their size ids
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db);

    match service.list(params.into()).await {
        Ok((products, total)) => paged(products, total),
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Create a product and the sizes it is sold in
pub async fn store(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db);

    match service.create(request).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db);

    match service.update(product_id, request).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}

/// List a product's images
pub async fn images(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db);

    match service.images(product_id).await {
        Ok(images) => (StatusCode::OK, Json(images)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Attach an image URL to a product
pub async fn store_image(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<ProductImageRequest>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db);

    match service.add_image(product_id, request).await {
        Ok(image) => (StatusCode::OK, Json(image)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}
