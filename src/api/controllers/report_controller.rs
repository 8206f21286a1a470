use crate::api::errors::APIError;
use crate::api::state::AppState;
use crate::reports::ReportKind;
use crate::services::report_service::ReportService;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// pdfmake document definition for one report kind
pub async fn show(State(state): State<AppState>, Path(kind): Path<String>) -> impl IntoResponse {
    let Ok(kind) = kind.parse::<ReportKind>() else {
        return APIError::NotFound("Report").into_response();
    };

    let service = ReportService::new(state.db);

    match service.build(kind).await {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}
