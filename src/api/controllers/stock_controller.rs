use crate::api::controllers::dto::stock_dto::{
    StockOperationRequest, UpdateStockOperationRequest,
};
use crate::api::errors::APIError;
use crate::api::extractors::ValidatedJson;
use crate::api::response::paged;
use crate::api::state::AppState;
use crate::data::repos::traits::repository::PageParams;
use crate::security::jwt::AccessClaims;
use crate::services::stock_service::StockService;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// List stock operations with their items
pub async fn index_operations(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let service = StockService::new(state.db);

    match service.list_operations(params.into()).await {
        Ok((operations, total)) => paged(operations, total),
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Record an entry or exit; amounts are updated in the same transaction
pub async fn store_operation(
    State(state): State<AppState>,
    claims: AccessClaims,
    ValidatedJson(request): ValidatedJson<StockOperationRequest>,
) -> impl IntoResponse {
    let service = StockService::new(state.db);

    match service.create_operation(claims.user_id(), request).await {
        Ok(operation) => (StatusCode::OK, Json(operation)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Change the date or cancel / restore an operation
pub async fn update_operation(
    State(state): State<AppState>,
    Path(operation_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateStockOperationRequest>,
) -> impl IntoResponse {
    let service = StockService::new(state.db);

    match service.update_operation(operation_id, request).await {
        Ok(operation) => (StatusCode::OK, Json(operation)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Running amount per product and size
pub async fn index_amounts(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let service = StockService::new(state.db);

    match service.list_amounts(params.into()).await {
        Ok((amounts, total)) => paged(amounts, total),
        Err(e) => APIError::from(e).into_response(),
    }
}
