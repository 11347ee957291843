use std::time::Duration;

use async_trait::async_trait;
use auth::Claims;
use auth::TokenVerifier;
use auth::ValidationOutcome;
use reqwest::StatusCode;
use serde::Deserialize;

/// Message used when the authority rejects a token without saying why.
const DEFAULT_REJECTION_MESSAGE: &str = "Invalid or expired token";

/// Token verifier that asks the authentication authority over HTTP.
///
/// This service holds no signing secret. Every call makes exactly one
/// request, bounded by the client timeout; a missing answer is reported as
/// [`ValidationOutcome::AuthorityUnreachable`], never as a rejection.
pub struct RemoteTokenVerifier {
    client: reqwest::Client,
    validate_url: String,
}

impl RemoteTokenVerifier {
    /// # Arguments
    /// * `base_url` - Authority root, e.g. `http://auth-service:8081`
    /// * `timeout` - Hard limit for the whole validation request
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            validate_url: format!("{}/api/auth/validate", base_url.trim_end_matches('/')),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ClaimsBody {
    data: Claims,
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
impl TokenVerifier for RemoteTokenVerifier {
    async fn verify(&self, token: &str) -> ValidationOutcome {
        let response = match self
            .client
            .post(&self.validate_url)
            .bearer_auth(token)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    timeout = e.is_timeout(),
                    "Authority request failed"
                );
                return ValidationOutcome::AuthorityUnreachable(e.to_string());
            }
        };

        match response.status() {
            StatusCode::OK => match response.json::<ClaimsBody>().await {
                Ok(body) => ValidationOutcome::Valid(body.data),
                Err(e) => {
                    tracing::warn!(error = %e, "Authority returned an unreadable validation body");
                    ValidationOutcome::AuthorityUnreachable(e.to_string())
                }
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let message = response
                    .json::<ErrorBody>()
                    .await
                    .map(|body| body.data.message)
                    .unwrap_or_else(|_| DEFAULT_REJECTION_MESSAGE.to_string());
                tracing::debug!(message = %message, "Authority rejected token");
                ValidationOutcome::Invalid(message)
            }
            status => {
                tracing::warn!(
                    status = status.as_u16(),
                    "Authority answered validation with unexpected status"
                );
                ValidationOutcome::AuthorityUnreachable(format!("unexpected status {}", status))
            }
        }
    }
}
