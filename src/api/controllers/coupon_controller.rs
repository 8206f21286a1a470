use crate::api::controllers::dto::coupon_dto::CouponRequest;
use crate::api::errors::APIError;
use crate::api::extractors::ValidatedJson;
use crate::api::response::paged;
use crate::api::state::AppState;
use crate::data::repos::traits::repository::PageParams;
use crate::services::coupon_service::CouponService;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// List coupons with their eligible products
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let service = CouponService::new(state.db);

    match service.list(params.into()).await {
        Ok((coupons, total)) => paged(coupons, total),
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Create a coupon
pub async fn store(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CouponRequest>,
) -> impl IntoResponse {
    let service = CouponService::new(state.db);

    match service.create(request).await {
        Ok(coupon) => (StatusCode::OK, Json(coupon)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(coupon_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<CouponRequest>,
) -> impl IntoResponse {
    let service = CouponService::new(state.db);

    match service.update(coupon_id, request).await {
        Ok(coupon) => (StatusCode::OK, Json(coupon)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}
