use async_trait::async_trait;
use auth::HashedPassword;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::CredentialId;
use crate::domain::credential::models::NewCredential;
use crate::domain::credential::models::Username;
use crate::domain::credential::ports::CredentialStore;

const USERNAME_UNIQUE_CONSTRAINT: &str = "credentials_username_key";

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CredentialRow {
    id: Uuid,
    username: String,
    password_hash: Vec<u8>,
    password_salt: Vec<u8>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = CredentialError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.username).map_err(|e| {
            CredentialError::DatabaseError(format!("Stored username is invalid: {}", e))
        })?;
        let password = HashedPassword::from_parts(row.password_hash, row.password_salt)
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        Ok(Credential {
            id: CredentialId(row.id),
            username,
            password,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn exists(&self, username: &Username) -> Result<bool, CredentialError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM credentials WHERE username = $1)
            "#,
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CredentialError::DatabaseError(e.to_string()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, username, password_hash, password_salt, created_at
            FROM credentials
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        row.map(Credential::try_from).transpose()
    }

    async fn create(&self, credential: NewCredential) -> Result<Credential, CredentialError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            INSERT INTO credentials (id, username, password_hash, password_salt)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, password_salt, created_at
            "#,
        )
        .bind(CredentialId::new().0)
        .bind(credential.username.as_str())
        .bind(credential.password.hash())
        .bind(credential.password.salt())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(USERNAME_UNIQUE_CONSTRAINT)
                {
                    return CredentialError::UsernameTaken(
                        credential.username.as_str().to_string(),
                    );
                }
            }
            CredentialError::DatabaseError(e.to_string())
        })?;

        Credential::try_from(row)
    }
}
