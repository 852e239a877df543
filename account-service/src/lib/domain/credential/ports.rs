use async_trait::async_trait;
use auth::Claims;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::AccessToken;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::LoginCommand;
use crate::domain::credential::models::NewCredential;
use crate::domain::credential::models::RegisterCommand;
use crate::domain::credential::models::RegisteredCredential;
use crate::domain::credential::models::Username;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Register a new credential.
    ///
    /// # Arguments
    /// * `command` - Validated username and password
    ///
    /// # Returns
    /// Public identity (id and normalized username) of the created credential
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered, whether caught by the
    ///   pre-check or by the store at write time
    /// * `DatabaseError` - Storage operation failed
    /// * `Unknown` - Password hashing failed
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<RegisteredCredential, CredentialError>;

    /// Verify a username/password pair and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `DatabaseError` - Storage operation failed
    /// * `Unknown` - Verification or token signing failed
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, CredentialError>;

    /// Check a bearer token and return its claims.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Signature is invalid or the token has expired
    fn verify_token(&self, token: &str) -> Result<Claims, CredentialError>;
}

/// Persistence operations for credentials.
///
/// Implementations must enforce username uniqueness at write time; an
/// existence check passing earlier is no guarantee that `create` succeeds.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Check whether a username is registered.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn exists(&self, username: &Username) -> Result<bool, CredentialError>;

    /// Retrieve a credential by username.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialError>;

    /// Persist a new credential and assign its identity.
    ///
    /// # Returns
    /// Stored credential with id and creation time
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn create(&self, credential: NewCredential) -> Result<Credential, CredentialError>;
}
