use crate::api::response::ErrorBody;
use crate::services::errors::ServiceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Every failure a handler can answer with. The display text is the
/// `error` field of the JSON body.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum APIError {
    #[error("Validation fails.")]
    Validation,
    #[error("Token not provided.")]
    TokenMissing,
    #[error("Token invalid.")]
    TokenInvalid,
    #[error("User is not an administrator.")]
    NotAdministrator,
    #[error("Guest users cannot perform this action.")]
    GuestForbidden,
    #[error("{0} not found.")]
    NotFound(&'static str),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("Internal server error.")]
    Internal,
}

impl APIError {
    pub fn status(&self) -> StatusCode {
        match self {
            APIError::Validation | APIError::BadRequest(_) => StatusCode::BAD_REQUEST,
            APIError::TokenMissing
            | APIError::TokenInvalid
            | APIError::NotAdministrator
            | APIError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            APIError::GuestForbidden => StatusCode::FORBIDDEN,
            APIError::NotFound(_) => StatusCode::NOT_FOUND,
            APIError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<ServiceError> for APIError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Validation => APIError::Validation,
            ServiceError::NotFound(resource) => APIError::NotFound(resource),
            ServiceError::UserAlreadyExists => APIError::BadRequest("User already exists."),
            ServiceError::UserNotFound => APIError::Unauthorized("User not found."),
            ServiceError::PasswordMismatch => APIError::Unauthorized("Password does not match."),
            ServiceError::InvalidCoupon => APIError::BadRequest("Coupon is not valid."),
            ServiceError::PriceNotFound { .. } => {
                APIError::BadRequest("Price not found for product.")
            }
            ServiceError::InsufficientStock { .. } => APIError::BadRequest("Insufficient stock."),
            ServiceError::InvalidStatusTransition => {
                APIError::BadRequest("Invalid status transition.")
            }
            ServiceError::OperationOwnedBySale(_) => {
                APIError::BadRequest("Operation belongs to a sale.")
            }
            ServiceError::InvalidReference => {
                APIError::BadRequest("Referenced record does not exist.")
            }
            ServiceError::Duplicate => APIError::BadRequest("Record already exists."),
            ServiceError::Auth(e) => {
                tracing::error!("Auth failure: {}", e);
                APIError::Internal
            }
            ServiceError::Report(e) => {
                tracing::error!("Report failure: {}", e);
                APIError::Internal
            }
            ServiceError::Database(e) => {
                tracing::error!("Database error: {}", e);
                APIError::Internal
            }
        }
    }
}

impl From<diesel::result::Error> for APIError {
    fn from(error: diesel::result::Error) -> Self {
        APIError::from(ServiceError::from(error))
    }
}
