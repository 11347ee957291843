use async_trait::async_trait;

use crate::profile::errors::ProfileError;
use crate::profile::models::CreateProfileCommand;
use crate::profile::models::EmailAddress;
use crate::profile::models::Profile;
use crate::profile::models::ProfileId;

/// Port for profile domain service operations.
#[async_trait]
pub trait ProfileServicePort: Send + Sync + 'static {
    /// Create the profile of a newly registered account.
    ///
    /// # Arguments
    /// * `command` - Validated id, name and email
    ///
    /// # Returns
    /// Created profile entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email already belongs to a profile
    /// * `DatabaseError` - Database operation failed
    async fn create_profile(&self, command: CreateProfileCommand)
        -> Result<Profile, ProfileError>;

    /// Retrieve a profile by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Profile does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, id: &ProfileId) -> Result<Profile, ProfileError>;
}

/// Persistence operations for profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    /// Persist a new profile.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email uniqueness violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, profile: Profile) -> Result<Profile, ProfileError>;

    /// # Returns
    /// Optional profile (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileError>;

    /// # Returns
    /// Optional profile (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Profile>, ProfileError>;
}
