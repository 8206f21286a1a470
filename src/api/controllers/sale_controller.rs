use crate::api::controllers::dto::sale_dto::{SaleRequest, UpdateSaleRequest};
use crate::api::errors::APIError;
use crate::api::extractors::ValidatedJson;
use crate::api::response::paged;
use crate::api::state::AppState;
use crate::data::repos::traits::repository::PageParams;
use crate::security::jwt::AccessClaims;
use crate::services::sale_service::SaleService;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// List sales with their items
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let service = SaleService::new(state.db);

    match service.list(params.into()).await {
        Ok((sales, total)) => paged(sales, total),
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Create a sale
pub async fn store(
    State(state): State<AppState>,
    claims: AccessClaims,
    ValidatedJson(request): ValidatedJson<SaleRequest>,
) -> impl IntoResponse {
    let service = SaleService::new(state.db);

    match service.create(claims.user_id(), request).await {
        Ok(sale) => (StatusCode::OK, Json(sale)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Move a sale through its statuses
pub async fn update(
    State(state): State<AppState>,
    Path(sale_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateSaleRequest>,
) -> impl IntoResponse {
    let service = SaleService::new(state.db);

    match service.update(sale_id, request).await {
        Ok(sale) => (StatusCode::OK, Json(sale)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}
