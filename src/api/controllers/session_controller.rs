use crate::api::controllers::dto::session_dto::{SessionDTO, SessionRequest};
use crate::api::controllers::dto::user_dto::UserDTO;
use crate::api::errors::APIError;
use crate::api::extractors::ValidatedJson;
use crate::api::state::AppState;
use crate::services::errors::ServiceError;
use crate::services::user_service::UserService;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Sign in with email and password
pub async fn store(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SessionRequest>,
) -> impl IntoResponse {
    let service = UserService::new(state.db);

    let user = match service.authenticate(&request.email, &request.password).await {
        Ok(user) => user,
        Err(e) => return APIError::from(e).into_response(),
    };

    match state.jwt.generate_token(&user) {
        Ok(token) => {
            tracing::info!("User {} signed in", user.id);
            let session = SessionDTO {
                user: UserDTO::from(user),
                token,
            };
            (StatusCode::OK, Json(session)).into_response()
        }
        Err(e) => APIError::from(ServiceError::from(e)).into_response(),
    }
}
