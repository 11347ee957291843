use std::sync::Arc;
use std::sync::OnceLock;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::verifier::LocalTokenVerifier;

/// Credential authority toolkit: password hashing plus token minting and
/// verification behind a single signing secret.
///
/// This is the only type that should be handed the secret. Services that
/// merely need to check tokens get a [`LocalTokenVerifier`] (same process) or
/// talk to the authority over the network.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: Arc<JwtHandler>,
    decoy_hash: OnceLock<String>,
}

// Never compared for a real account; only its hash is used.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with the default token issuer and lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_handler(JwtHandler::new(jwt_secret))
    }

    /// Create an authenticator around a configured token handler.
    pub fn with_handler(jwt_handler: JwtHandler) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: Arc::new(jwt_handler),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Create an authenticator with an explicit issuer label and token lifetime.
    pub fn with_settings(jwt_secret: &[u8], issuer: &str, lifetime: Duration) -> Self {
        Self::with_handler(
            JwtHandler::new(jwt_secret)
                .with_issuer(issuer)
                .with_lifetime(lifetime),
        )
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against its stored hash and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored PHC hash
    /// * `subject` - Account identifier for `sub`
    /// * `email` - Account email
    /// * `name` - Display name
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
        email: &str,
        name: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.issue(subject, email, name)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for which no account exists.
    ///
    /// Runs a full password comparison against a decoy hash built once with
    /// the same parameters as stored hashes, so an unknown email takes as
    /// long to reject as a wrong password. Always `InvalidCredentials`.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let decoy = self.decoy_hash.get_or_init(|| {
            self.password_hasher.hash(DECOY_PASSWORD).unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to build decoy password hash");
                String::new()
            })
        });

        let _ = self.password_hasher.verify(password, decoy);

        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without checking a password.
    ///
    /// Used right after registration, when the caller has just proven
    /// possession of the password by setting it.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        subject: impl ToString,
        email: &str,
        name: &str,
    ) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, email, name)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token)
    }

    /// In-process verifier sharing this authenticator's token handler.
    pub fn local_verifier(&self) -> LocalTokenVerifier {
        LocalTokenVerifier::new(Arc::clone(&self.jwt_handler))
    }
}
