use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::AccessToken;
use crate::domain::credential::models::LoginCommand;
use crate::domain::credential::models::NewCredential;
use crate::domain::credential::models::RegisterCommand;
use crate::domain::credential::models::RegisteredCredential;
use crate::domain::credential::models::Username;
use crate::domain::credential::ports::AuthenticationServicePort;
use crate::domain::credential::ports::CredentialStore;

/// Domain service implementation for registration and login.
///
/// Holds no mutable state of its own; the signing secret lives inside the
/// injected `Authenticator` and uniqueness is enforced by the store.
pub struct AuthenticationService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> AuthenticationService<CS>
where
    CS: CredentialStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hashing and token issuance, keyed by the signing secret
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }

    fn reject_unknown(&self, password: &str) -> CredentialError {
        match self.authenticator.reject_unknown(password) {
            AuthenticationError::InvalidCredentials => CredentialError::InvalidCredentials,
            other => CredentialError::Unknown(other.to_string()),
        }
    }
}

#[async_trait]
impl<CS> AuthenticationServicePort for AuthenticationService<CS>
where
    CS: CredentialStore,
{
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<RegisteredCredential, CredentialError> {
        let RegisterCommand { username, password } = command;

        if self.store.exists(&username).await? {
            tracing::info!(username = %username, "Registration rejected: username taken");
            return Err(CredentialError::UsernameTaken(username.to_string()));
        }

        let password = self
            .authenticator
            .hash_password(password.as_str())
            .map_err(|e| CredentialError::Unknown(format!("Password hashing failed: {}", e)))?;

        // A concurrent registration may have won since the check above
        let created = self
            .store
            .create(NewCredential { username, password })
            .await
            .inspect_err(|e| {
                if let CredentialError::UsernameTaken(name) = e {
                    tracing::info!(username = %name, "Registration lost a uniqueness race");
                }
            })?;

        tracing::info!(
            credential_id = %created.id,
            username = %created.username,
            "Credential registered"
        );

        Ok(RegisteredCredential::from(&created))
    }

    async fn login(&self, command: LoginCommand) -> Result<AccessToken, CredentialError> {
        let LoginCommand { username, password } = command;

        let Ok(username) = Username::new(username) else {
            tracing::info!("Login rejected: malformed username");
            return Err(self.reject_unknown(&password));
        };

        let Some(credential) = self.store.find_by_username(&username).await? else {
            tracing::info!(username = %username, "Login rejected");
            return Err(self.reject_unknown(&password));
        };

        let result = self
            .authenticator
            .authenticate(
                &password,
                &credential.password,
                credential.id,
                credential.username.as_str(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::info!(username = %username, "Login rejected");
                    CredentialError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => {
                    CredentialError::Unknown(format!("Password verification failed: {}", err))
                }
                AuthenticationError::JwtError(err) => {
                    CredentialError::Unknown(format!("Token generation failed: {}", err))
                }
            })?;

        tracing::info!(credential_id = %credential.id, "Access token issued");

        Ok(AccessToken {
            token: result.access_token,
        })
    }

    fn verify_token(&self, token: &str) -> Result<Claims, CredentialError> {
        self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            CredentialError::InvalidCredentials
        })
    }
}
