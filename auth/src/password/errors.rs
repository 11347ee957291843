use thiserror::Error;

/// Failures of the password hasher.
///
/// A wrong password is not an error; see `PasswordHasher::verify`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is unusable: {0}")]
    VerificationFailed(String),
}
