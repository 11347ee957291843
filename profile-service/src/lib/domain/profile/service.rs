use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::profile::errors::ProfileError;
use crate::profile::models::CreateProfileCommand;
use crate::profile::models::Profile;
use crate::profile::models::ProfileId;
use crate::profile::ports::ProfileRepository;
use crate::profile::ports::ProfileServicePort;

/// Domain service implementation for profile operations.
pub struct ProfileService<PR>
where
    PR: ProfileRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProfileService<PR>
where
    PR: ProfileRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProfileServicePort for ProfileService<PR>
where
    PR: ProfileRepository,
{
    async fn create_profile(
        &self,
        command: CreateProfileCommand,
    ) -> Result<Profile, ProfileError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            tracing::info!(email = %command.email, "Profile rejected: email already in use");
            return Err(ProfileError::EmailAlreadyExists(command.email.to_string()));
        }

        let now = Utc::now();
        let profile = Profile {
            id: command.id,
            name: command.name,
            email: command.email,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(profile).await?;
        tracing::info!(profile_id = %created.id, "Profile created");

        Ok(created)
    }

    async fn get_profile(&self, id: &ProfileId) -> Result<Profile, ProfileError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProfileError::NotFound(id.to_string()))
    }
}
