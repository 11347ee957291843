use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claims carried by an account token.
///
/// Serializes to a flat JSON object. Tokens issued by this crate always
/// carry `sub`, `email`, `name`, `iat`, `exp` and `iss`; claims this struct
/// does not model are kept in `extra` so nothing is lost on a decode and
/// re-encode (for example when the validation endpoint echoes claims back).
///
/// `sub` is the canonical subject claim: the account id as a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Claims {
    /// Subject (account identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Account email at the time of issuance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Display name at the time of issuance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Any other claim, flattened into the token
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the fixed claim set for an authenticated account.
    ///
    /// # Arguments
    /// * `subject` - Account identifier
    /// * `email` - Account email
    /// * `name` - Display name
    /// * `issuer` - Issuer label
    /// * `lifetime` - Time from now until the token expires
    ///
    /// # Errors
    /// * `EncodingFailed` - `now + lifetime` is not a representable instant
    pub fn for_account(
        subject: impl ToString,
        email: impl Into<String>,
        name: impl Into<String>,
        issuer: impl Into<String>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(lifetime).ok_or_else(|| {
            JwtError::EncodingFailed(format!("Token lifetime out of range: {}", lifetime))
        })?;

        Ok(Self {
            sub: Some(subject.to_string()),
            email: Some(email.into()),
            name: Some(name.into()),
            iat: Some(now.timestamp()),
            exp: Some(expires_at.timestamp()),
            iss: Some(issuer.into()),
            extra: HashMap::new(),
        })
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Add a custom claim.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// Expiry is a hard boundary: a token is still valid in the second named
    /// by `exp` and expired in the one after it.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp < current_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_account() {
        let claims = Claims::for_account(
            "0b5c1c3e-0000-4000-8000-000000000001",
            "ana@x.com",
            "Ana",
            "auth-service",
            Duration::hours(24),
        )
        .unwrap();

        assert_eq!(claims.subject(), Some("0b5c1c3e-0000-4000-8000-000000000001"));
        assert_eq!(claims.email(), Some("ana@x.com"));
        assert_eq!(claims.name(), Some("Ana"));
        assert_eq!(claims.iss.as_deref(), Some("auth-service"));
        assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 24 * 60 * 60);
    }

    #[test]
    fn test_for_account_with_unrepresentable_lifetime() {
        let result = Claims::for_account(
            "42",
            "ana@x.com",
            "Ana",
            "auth-service",
            Duration::hours(1_000_000_000_000),
        );

        assert!(matches!(result, Err(JwtError::EncodingFailed(_))));
    }

    #[test]
    fn test_serializes_flat() {
        let claims = Claims::new()
            .with_subject("42")
            .with_issuer("auth-service")
            .with_extra("role", "admin");

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["sub"], "42");
        assert_eq!(value["iss"], "auth-service");
        assert_eq!(value["role"], "admin");
        assert!(value.get("extra").is_none());
        assert!(value.get("email").is_none());
    }

    #[test]
    fn test_unknown_claims_survive_round_trip() {
        let raw = serde_json::json!({
            "sub": "42",
            "email": "ana@x.com",
            "tenant": "blue"
        });

        let claims: Claims = serde_json::from_value(raw).unwrap();
        assert_eq!(claims.extra.get("tenant").unwrap(), "blue");
        assert_eq!(serde_json::to_value(&claims).unwrap()["tenant"], "blue");
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new().with_expiration(1000);

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_is_expired_no_exp_claim() {
        assert!(!Claims::new().is_expired(9_999_999_999));
    }
}
