use thiserror::Error;

/// Error for ProfileId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for ProfileName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileNameError {
    #[error("Name too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all profile operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid profile ID: {0}")]
    InvalidId(#[from] ProfileIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] ProfileNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Domain-level errors
    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
