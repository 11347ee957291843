use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::profile::errors::EmailError;
use crate::profile::errors::ProfileIdError;
use crate::profile::errors::ProfileNameError;
use crate::profile::models::CreateProfileCommand;
use crate::profile::models::EmailAddress;
use crate::profile::models::Profile;
use crate::profile::models::ProfileId;
use crate::profile::models::ProfileName;

/// Called by the authority right after a credential is stored.
pub async fn create_profile(
    State(state): State<AppState>,
    payload: Result<Json<CreateProfileRequest>, JsonRejection>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .profile_service
        .create_profile(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::CREATED, profile.into()))
}

/// HTTP request body for creating a profile (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateProfileRequest {
    id: String,
    name: String,
    email: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateProfileRequestError {
    #[error("Invalid profile ID: {0}")]
    Id(#[from] ProfileIdError),

    #[error("Invalid name: {0}")]
    Name(#[from] ProfileNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl CreateProfileRequest {
    fn try_into_command(self) -> Result<CreateProfileCommand, ParseCreateProfileRequestError> {
        let id = ProfileId::from_string(&self.id)?;
        let name = ProfileName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        Ok(CreateProfileCommand::new(id, name, email))
    }
}

impl From<ParseCreateProfileRequestError> for ApiError {
    fn from(err: ParseCreateProfileRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Profile as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Profile> for ProfileResponseData {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name.as_str().to_string(),
            email: profile.email.as_str().to_string(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}
