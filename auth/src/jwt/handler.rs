use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::Claims;
use super::errors::JwtError;

/// Default token lifetime in hours.
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Longest token lifetime a deployment may configure, in hours (one year).
pub const MAX_TOKEN_LIFETIME_HOURS: i64 = 24 * 365;

/// Default `iss` claim.
pub const DEFAULT_ISSUER: &str = "auth-service";

/// Token codec: mints and verifies HMAC-signed tokens.
///
/// Tokens are signed with HS256. On decode the header's algorithm must be in
/// the HMAC family (HS256/HS384/HS512), `exp` and `sub` must be present, and
/// expiry is checked with zero leeway.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    issuer: String,
    lifetime: Duration,
}

impl JwtHandler {
    /// Create a handler signing with `secret`.
    ///
    /// # Arguments
    /// * `secret` - HMAC key; use at least 32 bytes
    ///
    /// # Returns
    /// Handler using the default issuer and lifetime
    pub fn new(secret: &[u8]) -> Self {
        let algorithm = Algorithm::HS256;

        let mut validation = Validation::new(algorithm);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
            issuer: DEFAULT_ISSUER.to_string(),
            lifetime: Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS),
        }
    }

    /// Set the `iss` label put on issued tokens.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Set the lifetime of issued tokens.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for an account.
    ///
    /// # Arguments
    /// * `subject` - Account identifier, stored in `sub`
    /// * `email` - Account email
    /// * `name` - Display name
    ///
    /// # Returns
    /// Signed compact token
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed, or the lifetime overflows the clock
    pub fn issue(
        &self,
        subject: impl ToString,
        email: &str,
        name: &str,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_account(subject, email, name, &self.issuer, self.lifetime)?;
        self.encode(&claims)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `AlgorithmMismatch` - Header declares a non-HMAC algorithm
    /// * `MissingClaim` - `exp` or `sub` is absent
    /// * `InvalidToken` / `DecodingFailed` - Malformed token
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode(token)
    }

    /// Encode arbitrary claims with this handler's key.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token into any claims type.
    ///
    /// Same checks as [`JwtHandler::verify`].
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let token_data =
            decode::<T>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                        JwtError::AlgorithmMismatch
                    }
                    ErrorKind::MissingRequiredClaim(claim) => {
                        JwtError::MissingClaim(claim.clone())
                    }
                    ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                    _ => JwtError::DecodingFailed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
