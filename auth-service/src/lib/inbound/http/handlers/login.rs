use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::register::SessionResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::credential::errors::CredentialError;
use crate::credential::models::EmailAddress;
use crate::credential::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = payload?;

    // A malformed email cannot belong to an account; answer like any other miss.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::from(CredentialError::InvalidCredentials))?;

    let session = state
        .authority
        .login(LoginCommand::new(email, body.password))
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, (&session).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
