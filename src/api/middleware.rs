use crate::api::errors::APIError;
use crate::api::state::AppState;
use crate::security::access::{admin_or_guest_may_access, guest_may_access};
use crate::security::jwt::AccessClaims;
use axum::RequestPartsExt;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

/// Decodes the bearer token and stores its claims in the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, APIError> {
    let (mut parts, body) = req.into_parts();

    let bearer = match parts.extract::<TypedHeader<Authorization<Bearer>>>().await {
        Ok(TypedHeader(Authorization(bearer))) => bearer,
        Err(rejection) if rejection.is_missing() => return Err(APIError::TokenMissing),
        Err(rejection) => {
            tracing::debug!("Invalid authorization header: {}", rejection);
            return Err(APIError::TokenInvalid);
        }
    };

    let claims = state
        .jwt
        .decode_token::<AccessClaims>(bearer.token())
        .map_err(|e| {
            tracing::debug!("Token decoding error: {}", e);
            APIError::TokenInvalid
        })?;

    parts.extensions.insert(claims);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Lets guests read but not write.
pub async fn guest_read_only(
    claims: AccessClaims,
    req: Request,
    next: Next,
) -> Result<Response, APIError> {
    if !guest_may_access(claims.guest, req.method()) {
        tracing::debug!("Guest {} blocked on {} {}", claims.sub, req.method(), req.uri());
        return Err(APIError::GuestForbidden);
    }

    Ok(next.run(req).await)
}

/// Administrators pass; guests may only GET.
pub async fn admin_or_guest_read_only(
    claims: AccessClaims,
    req: Request,
    next: Next,
) -> Result<Response, APIError> {
    if !admin_or_guest_may_access(claims.administrator, claims.guest, req.method()) {
        tracing::debug!("User {} blocked on {} {}", claims.sub, req.method(), req.uri());
        return Err(APIError::NotAdministrator);
    }

    Ok(next.run(req).await)
}
