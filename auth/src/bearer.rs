use thiserror::Error;

/// Authorization scheme prefix, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Problems with an `Authorization` header value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    Malformed,
}

/// Extract the token from an `Authorization` header value.
///
/// `None` is an absent header. A value without the `Bearer ` prefix, or with
/// nothing after it, is malformed.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, BearerError> {
    let value = header.ok_or(BearerError::Missing)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerError::Malformed)?
        .trim();

    if token.is_empty() {
        return Err(BearerError::Malformed);
    }

    Ok(token)
}
