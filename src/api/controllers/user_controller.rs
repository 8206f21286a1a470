use crate::api::controllers::dto::user_dto::{CreateUserRequest, UpdateUserRequest, UserDTO};
use crate::api::errors::APIError;
use crate::api::extractors::ValidatedJson;
use crate::api::response::paged;
use crate::api::state::AppState;
use crate::data::repos::implementors::user_repo::UserRepo;
use crate::data::repos::traits::repository::{PageParams, Repository};
use crate::services::user_service::UserService;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// List users
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let repo = UserRepo::new(state.db);

    match repo.get_page(params.into()).await {
        Ok((users, total)) => {
            let dtos: Vec<UserDTO> = users.into_iter().map(UserDTO::from).collect();
            paged(dtos, total)
        }
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Register a user
pub async fn store(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> impl IntoResponse {
    let service = UserService::new(state.db);

    match service.create_user(request).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}

/// Update a user; the password is only replaced when sent
pub async fn update(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> impl IntoResponse {
    let service = UserService::new(state.db);

    match service.update_user(user_id, request).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => APIError::from(e).into_response(),
    }
}
