//! Credential and token primitives shared by the account services
//!
//! - Password hashing (Argon2id, fixed cost)
//! - Token issuance and verification (HMAC-signed JWT, fixed claim set)
//! - The `TokenVerifier` capability, with an in-process implementation
//! - `Authorization: Bearer` header parsing
//!
//! Only the authority service constructs an [`Authenticator`] and therefore
//! holds the signing secret. Other services depend on this crate for the
//! `TokenVerifier` trait and the `Claims` type, and verify tokens remotely.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("secret1").unwrap();
//! assert!(hasher.verify("secret1", &hash).unwrap());
//! assert!(!hasher.verify("wrongpass", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::JwtHandler;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue("42", "ana@x.com", "Ana").unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.subject(), Some("42"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("secret1").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth
//!     .authenticate("secret1", &hash, "42", "ana@x.com", "Ana")
//!     .unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.email(), Some("ana@x.com"));
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;
pub mod verifier;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::extract_bearer;
pub use bearer::BearerError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use verifier::LocalTokenVerifier;
pub use verifier::TokenVerifier;
pub use verifier::ValidationOutcome;
