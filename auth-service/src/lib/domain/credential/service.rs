use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use chrono::Utc;

use crate::credential::errors::CredentialError;
use crate::credential::models::AccountId;
use crate::credential::models::Credential;
use crate::credential::models::LoginCommand;
use crate::credential::models::NewProfile;
use crate::credential::models::RegisterCommand;
use crate::credential::models::Session;
use crate::credential::ports::AuthorityPort;
use crate::credential::ports::CredentialRepository;
use crate::credential::ports::ProfileProvisioner;

/// Authentication authority.
///
/// Owns the registration and login state transitions and is the only
/// component holding the signing secret (through the injected
/// [`Authenticator`]).
pub struct Authority<CR, PP>
where
    CR: CredentialRepository,
    PP: ProfileProvisioner,
{
    repository: Arc<CR>,
    provisioner: Arc<PP>,
    authenticator: Arc<Authenticator>,
}

impl<CR, PP> Authority<CR, PP>
where
    CR: CredentialRepository,
    PP: ProfileProvisioner,
{
    /// Create a new authority with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store
    /// * `provisioner` - Profile store client used after registration
    /// * `authenticator` - Password hasher and token codec holding the secret
    pub fn new(
        repository: Arc<CR>,
        provisioner: Arc<PP>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            provisioner,
            authenticator,
        }
    }

    /// Undo a committed credential whose registration could not be completed.
    async fn compensate(&self, id: &AccountId) {
        match self.repository.delete(id).await {
            Ok(()) => tracing::info!(account_id = %id, "Rolled back credential"),
            Err(e) => tracing::error!(
                account_id = %id,
                error = %e,
                "Failed to roll back credential; it is now orphaned"
            ),
        }
    }
}

#[async_trait]
impl<CR, PP> AuthorityPort for Authority<CR, PP>
where
    CR: CredentialRepository,
    PP: ProfileProvisioner,
{
    async fn register(&self, command: RegisterCommand) -> Result<Session, CredentialError> {
        // Fast path only; the store's unique constraint decides races.
        if self.repository.find_by_email(&command.email).await?.is_some() {
            tracing::info!(email = %command.email, "Registration rejected: email already registered");
            return Err(CredentialError::EmailConflict(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;

        let now = Utc::now();
        let credential = Credential {
            id: AccountId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        let mut account = credential.account();

        account.id = self.repository.insert(credential).await?;
        tracing::info!(account_id = %account.id, "Credential stored");

        if let Err(e) = self.provisioner.provision(&NewProfile::from(&account)).await {
            tracing::error!(
                account_id = %account.id,
                error = %e,
                "Profile provisioning failed, rolling back registration"
            );
            self.compensate(&account.id).await;
            return Err(CredentialError::ProfileProvisioning(e));
        }

        let token = self
            .authenticator
            .issue_token(account.id, account.email.as_str(), account.name.as_str())
            .map_err(|e| CredentialError::TokenIssuance(e.to_string()))?;

        Ok(Session { account, token })
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, CredentialError> {
        let Some(credential) = self.repository.find_by_email(&command.email).await? else {
            // Same hashing cost as a wrong password
            self.authenticator.reject_unknown_account(&command.password);
            tracing::info!(email = %command.email, reason = "unknown_email", "Login rejected");
            return Err(CredentialError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &credential.password_hash,
                credential.id,
                credential.email.as_str(),
                credential.name.as_str(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::info!(account_id = %credential.id, reason = "password_mismatch", "Login rejected");
                    CredentialError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(account_id = %credential.id, error = %err, "Stored password hash is unusable");
                    CredentialError::InvalidCredentials
                }
                AuthenticationError::JwtError(err) => CredentialError::TokenIssuance(err.to_string()),
            })?;

        Ok(Session {
            account: credential.account(),
            token: result.access_token,
        })
    }

    fn validate_token(&self, token: &str) -> Result<Claims, CredentialError> {
        self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            CredentialError::InvalidToken
        })
    }
}
