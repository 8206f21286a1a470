use crate::api::controllers::dto::price_dto::{PriceDTO, PriceQuery, PriceRequest};
use crate::api::errors::APIError;
use crate::api::extractors::ValidatedJson;
use crate::api::response::paged;
use crate::api::state::AppState;
use crate::data::repos::implementors::price_repo::PriceRepo;
use crate::data::repos::traits::repository::{Page, Repository};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// List prices, optionally for one product (`?product_id=`)
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> impl IntoResponse {
    let repo = PriceRepo::new(state.db);
    let page = Page::new(query.page, query.per_page);

    let result = match query.product_id {
        Some(product_id) => repo.get_page_for_product(product_id, page).await,
        None => repo.get_page(page).await,
    };

    match result {
        Ok((prices, total)) => {
            let dtos: Vec<PriceDTO> = prices.into_iter().map(PriceDTO::from).collect();
            paged(dtos, total)
        }
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Add a price window for a product size
pub async fn store(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PriceRequest>,
) -> impl IntoResponse {
    let repo = PriceRepo::new(state.db);

    match repo.add(request.into()).await {
        Ok(price) => (StatusCode::OK, Json(PriceDTO::from(price))).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(price_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<PriceRequest>,
) -> impl IntoResponse {
    let repo = PriceRepo::new(state.db);

    match repo.update(price_id, request.into()).await {
        Ok(Some(price)) => (StatusCode::OK, Json(PriceDTO::from(price))).into_response(),
        Ok(None) => APIError::NotFound("Price").into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}
