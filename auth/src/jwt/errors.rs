use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Token signature does not match")]
    InvalidSignature,

    #[error("Token algorithm is not permitted")]
    AlgorithmMismatch,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
