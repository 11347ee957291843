use async_trait::async_trait;
use auth::Claims;

use crate::credential::errors::CredentialError;
use crate::credential::errors::ProvisioningError;
use crate::credential::models::AccountId;
use crate::credential::models::Credential;
use crate::credential::models::EmailAddress;
use crate::credential::models::LoginCommand;
use crate::credential::models::NewProfile;
use crate::credential::models::RegisterCommand;
use crate::credential::models::Session;

/// Port for the authentication authority.
///
/// Every call is independent; the authority keeps no per-caller state.
#[async_trait]
pub trait AuthorityPort: Send + Sync + 'static {
    /// Register a new account and issue its first token.
    ///
    /// # Arguments
    /// * `command` - Validated name, email and password
    ///
    /// # Returns
    /// The new account and a token for it
    ///
    /// # Errors
    /// * `EmailConflict` - Email is already registered, detected before or at insert
    /// * `Hashing` - Password hashing failed
    /// * `Persistence` - Credential store failed
    /// * `ProfileProvisioning` - Profile store did not accept the profile; the
    ///   credential has been removed again
    /// * `TokenIssuance` - Token could not be signed
    async fn register(&self, command: RegisterCommand) -> Result<Session, CredentialError>;

    /// Check email and password and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Persistence` - Credential store failed
    /// * `TokenIssuance` - Token could not be signed
    async fn login(&self, command: LoginCommand) -> Result<Session, CredentialError>;

    /// Verify a token and return its claims.
    ///
    /// Side-effect free; safe to call at any rate.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, malformed, expired or wrong algorithm
    fn validate_token(&self, token: &str) -> Result<Claims, CredentialError>;
}

/// Persistence operations for credentials.
///
/// Implementations must enforce email uniqueness atomically: it is the only
/// defense against two concurrent registrations of the same email.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Look up a credential by its normalized email.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `Persistence` - Store operation failed
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, CredentialError>;

    /// Persist a new credential.
    ///
    /// # Returns
    /// Identifier of the stored credential
    ///
    /// # Errors
    /// * `EmailConflict` - Email uniqueness violated
    /// * `Persistence` - Store operation failed
    async fn insert(&self, credential: Credential) -> Result<AccountId, CredentialError>;

    /// Remove a credential. Used to undo a registration that could not be completed.
    ///
    /// # Errors
    /// * `Persistence` - Store operation failed
    async fn delete(&self, id: &AccountId) -> Result<(), CredentialError>;
}

/// Creates the profile record that accompanies every account.
#[async_trait]
pub trait ProfileProvisioner: Send + Sync + 'static {
    /// Create the profile for a freshly registered account.
    ///
    /// # Errors
    /// * `Unreachable` - Profile store could not be reached in time
    /// * `Rejected` - Profile store answered with anything but success
    async fn provision(&self, profile: &NewProfile) -> Result<(), ProvisioningError>;
}
