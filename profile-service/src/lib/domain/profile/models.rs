use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::profile::errors::EmailError;
use crate::profile::errors::ProfileIdError;
use crate::profile::errors::ProfileNameError;

/// Profile aggregate entity.
///
/// One per account; shares the account's identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: ProfileId,
    pub name: ProfileName,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile unique identifier type
///
/// Equal to the account id issued by the authority, and therefore to the
/// `sub` claim of the account's tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    /// Parse a profile ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProfileIdError> {
        Uuid::parse_str(s)
            .map(ProfileId)
            .map_err(|e| ProfileIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// 2-100 characters after trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileName(String);

impl ProfileName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 100;

    /// # Errors
    /// * `TooShort` - Fewer than 2 characters
    /// * `TooLong` - More than 100 characters
    pub fn new(name: String) -> Result<Self, ProfileNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();

        if length < Self::MIN_LENGTH {
            Err(ProfileNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(ProfileNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Normalized (trimmed, lowercased) the same way the authority normalizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let normalized = email.trim().to_lowercase();

        email_address::EmailAddress::from_str(&normalized)
            .map(|_| EmailAddress(normalized))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create the profile of a newly registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProfileCommand {
    pub id: ProfileId,
    pub name: ProfileName,
    pub email: EmailAddress,
}

impl CreateProfileCommand {
    pub fn new(id: ProfileId, name: ProfileName, email: EmailAddress) -> Self {
        Self { id, name, email }
    }
}
