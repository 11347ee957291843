use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::credential::errors::CredentialError;
use crate::credential::models::AccountId;
use crate::credential::models::Credential;
use crate::credential::models::DisplayName;
use crate::credential::models::EmailAddress;
use crate::credential::ports::CredentialRepository;

pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = CredentialError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        Ok(Credential {
            id: AccountId(row.id),
            name: DisplayName::new(row.name)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> CredentialError {
    CredentialError::Persistence(e.to_string())
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, CredentialError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM credentials
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Credential::try_from).transpose()
    }

    async fn insert(&self, credential: Credential) -> Result<AccountId, CredentialError> {
        sqlx::query(
            r#"
            INSERT INTO credentials (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(credential.id.0)
        .bind(credential.name.as_str())
        .bind(credential.email.as_str())
        .bind(&credential.password_hash)
        .bind(credential.created_at)
        .bind(credential.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("credentials_email_key")
                {
                    return CredentialError::EmailConflict(credential.email.to_string());
                }
            }
            database_error(e)
        })?;

        Ok(credential.id)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), CredentialError> {
        sqlx::query(
            r#"
            DELETE FROM credentials
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }
}
