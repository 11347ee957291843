use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::profile::errors::ProfileError;
use crate::profile::models::EmailAddress;
use crate::profile::models::Profile;
use crate::profile::models::ProfileId;
use crate::profile::models::ProfileName;
use crate::profile::ports::ProfileRepository;

pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = ProfileError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: ProfileId(row.id),
            name: ProfileName::new(row.name)?,
            email: EmailAddress::new(row.email)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> ProfileError {
    ProfileError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn create(&self, profile: Profile) -> Result<Profile, ProfileError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, name, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(profile.id.0)
        .bind(profile.name.as_str())
        .bind(profile.email.as_str())
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("profiles_email_key")
                {
                    return ProfileError::EmailAlreadyExists(profile.email.to_string());
                }
            }
            database_error(e)
        })?;

        Ok(profile)
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Profile::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Profile>, ProfileError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM profiles
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Profile::try_from).transpose()
    }
}
