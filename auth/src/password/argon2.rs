use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// One-way password transform and comparator.
///
/// Argon2id (v19) with a fresh random salt per hash. The cost parameters are
/// pinned to the crate's recommended defaults (19 MiB memory, 2 passes,
/// 1 lane) and cannot be changed by callers.
///
/// The hasher has no length policy of its own: empty and very long inputs
/// are hashed like any other. Minimum length rules belong to the caller.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the fixed cost parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        }
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`)
    ///
    /// # Errors
    /// * `HashingFailed` - The underlying primitive failed (allocation or RNG failure)
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Compare a plaintext password with a stored PHC hash.
    ///
    /// A mismatch is `Ok(false)`. The parameters embedded in the stored hash
    /// are the ones used for the comparison.
    ///
    /// # Errors
    /// * `VerificationFailed` - The stored value is not a parseable PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
