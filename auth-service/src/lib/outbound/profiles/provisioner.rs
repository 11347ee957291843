use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::credential::errors::ProvisioningError;
use crate::credential::models::NewProfile;
use crate::credential::ports::ProfileProvisioner;

/// Profile provisioner calling the profile service over HTTP.
///
/// One attempt per registration, bounded by the client timeout.
pub struct HttpProfileProvisioner {
    client: reqwest::Client,
    create_url: String,
}

impl HttpProfileProvisioner {
    /// # Arguments
    /// * `base_url` - Profile service root, e.g. `http://profile-service:8082`
    /// * `timeout` - Hard limit for the whole request
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            create_url: format!("{}/api/users", base_url.trim_end_matches('/')),
        })
    }
}

#[derive(Debug, Serialize)]
struct CreateProfileRequest<'a> {
    id: String,
    name: &'a str,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    data: ErrorData,
}

#[derive(Debug, Deserialize)]
struct ErrorData {
    message: String,
}

#[async_trait]
impl ProfileProvisioner for HttpProfileProvisioner {
    async fn provision(&self, profile: &NewProfile) -> Result<(), ProvisioningError> {
        let body = CreateProfileRequest {
            id: profile.id.to_string(),
            name: &profile.name,
            email: &profile.email,
        };

        let response = self
            .client
            .post(&self.create_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProvisioningError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::CREATED {
            tracing::debug!(account_id = %profile.id, "Profile provisioned");
            return Ok(());
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.data.message)
            .unwrap_or_else(|_| format!("unexpected status {}", status));

        Err(ProvisioningError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
