use crate::api::controllers::dto::user_dto::ProfileRequest;
use crate::api::errors::APIError;
use crate::api::extractors::ValidatedJson;
use crate::api::state::AppState;
use crate::security::jwt::AccessClaims;
use crate::services::user_service::UserService;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// The signed user's own record
pub async fn show(State(state): State<AppState>, claims: AccessClaims) -> impl IntoResponse {
    let service = UserService::new(state.db);

    match service.get_profile(claims.user_id()).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}

pub async fn update(
    State(state): State<AppState>,
    claims: AccessClaims,
    ValidatedJson(request): ValidatedJson<ProfileRequest>,
) -> impl IntoResponse {
    let service = UserService::new(state.db);

    match service.update_profile(claims.user_id(), request).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}
