use auth::extract_bearer;
use auth::BearerError;
use auth::Claims;
use auth::ValidationOutcome;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::profile::models::ProfileId;

/// Extension type carrying the caller identity into protected handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: ProfileId,
    pub email: Option<String>,
    pub name: Option<String>,
    pub claims: Claims,
}

/// Why a protected request was turned away
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Missing Authorization header")]
    MissingAuthorization,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedAuthorization,

    #[error("{0}")]
    Unauthorized(String),

    #[error("Authentication service unavailable")]
    AuthorityUnreachable,
}

impl From<BearerError> for AuthorizationError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::Missing => AuthorizationError::MissingAuthorization,
            BearerError::Malformed => AuthorizationError::MalformedAuthorization,
        }
    }
}

impl From<AuthorizationError> for ApiError {
    fn from(err: AuthorizationError) -> Self {
        match err {
            AuthorizationError::AuthorityUnreachable => {
                ApiError::ServiceUnavailable(err.to_string())
            }
            _ => ApiError::Unauthorized(err.to_string()),
        }
    }
}

impl IntoResponse for AuthorizationError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Middleware that asks the token verifier about the bearer token and adds
/// the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthorizationError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| BearerError::Malformed))
        .transpose()?;
    let token = extract_bearer(header)?.to_string();

    let claims = match state.token_verifier.verify(&token).await {
        ValidationOutcome::Valid(claims) => claims,
        ValidationOutcome::Invalid(message) => {
            tracing::debug!(message = %message, "Token rejected");
            return Err(AuthorizationError::Unauthorized(message));
        }
        ValidationOutcome::AuthorityUnreachable(reason) => {
            tracing::warn!(reason = %reason, "Token could not be validated");
            return Err(AuthorizationError::AuthorityUnreachable);
        }
    };

    let id = claims
        .subject()
        .ok_or_else(|| {
            tracing::error!("Missing 'sub' claim in validated token");
            AuthorizationError::Unauthorized("Invalid token format".to_string())
        })
        .and_then(|subject| {
            ProfileId::from_string(subject).map_err(|e| {
                tracing::error!(error = %e, "Failed to parse profile ID from token");
                AuthorizationError::Unauthorized("Invalid token format".to_string())
            })
        })?;

    let user = AuthenticatedUser {
        id,
        email: claims.email().map(str::to_string),
        name: claims.name().map(str::to_string),
        claims,
    };
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
