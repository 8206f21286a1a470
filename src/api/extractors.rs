use crate::api::errors::APIError;
use crate::security::jwt::AccessClaims;
use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

/// Claims placed in the request extensions by the `authenticate` middleware.
impl<S> FromRequestParts<S> for AccessClaims
where
    S: Send + Sync,
{
    type Rejection = APIError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AccessClaims>()
            .cloned()
            .ok_or(APIError::TokenMissing)
    }
}

/// JSON body that passed its `validator` rules. Malformed JSON, wrong types,
/// missing fields and rule failures all answer `Validation fails.`
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = APIError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Rejected request body: {}", rejection);
            APIError::Validation
        })?;

        value.validate().map_err(|errors| {
            tracing::debug!("Request body failed validation: {}", errors);
            APIError::Validation
        })?;

        Ok(ValidatedJson(value))
    }
}
