use axum::Json;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

pub static TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// A page of rows as a JSON array, with the unpaged row count in
/// `X-Total-Count`.
pub fn paged<T: Serialize>(rows: Vec<T>, total: i64) -> Response {
    let mut response = (StatusCode::OK, Json(rows)).into_response();
    response
        .headers_mut()
        .insert(TOTAL_COUNT.clone(), HeaderValue::from(total));
    response
}
