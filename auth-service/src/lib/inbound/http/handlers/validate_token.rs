use auth::extract_bearer;
use auth::BearerError;
use auth::Claims;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Validation endpoint used by downstream services.
///
/// Reads `Authorization: Bearer <token>` and answers with the token's claims
/// as a flat mapping, or 401.
pub async fn validate_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<Claims>, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| BearerError::Malformed))
        .transpose()
        .map_err(unauthorized)?;

    let token = extract_bearer(header).map_err(unauthorized)?;

    let claims = state.authority.validate_token(token)?;

    tracing::debug!(subject = ?claims.subject(), "Token validated");
    Ok(ApiSuccess::new(StatusCode::OK, claims))
}

fn unauthorized(err: BearerError) -> ApiError {
    tracing::debug!(error = %err, "Validation request without usable bearer token");
    ApiError::Unauthorized(err.to_string())
}
