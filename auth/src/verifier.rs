use std::sync::Arc;

use async_trait::async_trait;

use crate::jwt::Claims;
use crate::jwt::JwtHandler;

/// Result of one attempt to validate a bearer token.
///
/// Never persisted; built fresh for every request.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// The authority vouched for the token.
    Valid(Claims),

    /// The authority rejected the token.
    Invalid(String),

    /// No judgment could be obtained (network error, timeout, unexpected reply).
    AuthorityUnreachable(String),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }
}

/// Capability to decide whether a bearer token is valid.
///
/// Implemented by a network client in services that only trust the authority,
/// and by [`LocalTokenVerifier`] when the token codec lives in the same
/// process. Callers cannot tell the two apart.
#[async_trait]
pub trait TokenVerifier: Send + Sync + 'static {
    /// Validate a raw token (without the `Bearer ` prefix).
    async fn verify(&self, token: &str) -> ValidationOutcome;
}

/// Verifier backed directly by the token codec.
#[derive(Clone)]
pub struct LocalTokenVerifier {
    jwt_handler: Arc<JwtHandler>,
}

impl LocalTokenVerifier {
    pub fn new(jwt_handler: Arc<JwtHandler>) -> Self {
        Self { jwt_handler }
    }
}

#[async_trait]
impl TokenVerifier for LocalTokenVerifier {
    async fn verify(&self, token: &str) -> ValidationOutcome {
        match self.jwt_handler.verify(token) {
            Ok(claims) => ValidationOutcome::Valid(claims),
            Err(e) => {
                tracing::debug!(error = %e, "Local token verification failed");
                ValidationOutcome::Invalid("Invalid or expired token".to_string())
            }
        }
    }
}
