use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::password::HashedPassword;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::SALT_LENGTH;
use crate::secret::SigningSecret;

/// Salt used to spend the same hashing work on logins for unknown accounts.
const DECOY_SALT: [u8; SALT_LENGTH] = [0u8; SALT_LENGTH];

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Validated key material for token signing
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(secret),
        }
    }

    /// Hash a password for storage with a fresh salt.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<HashedPassword, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored` - Stored hash/salt pair
    /// * `subject` - Credential identifier placed in `sub`
    /// * `name` - Normalized username placed in `name`
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored: &HashedPassword,
        subject: impl ToString,
        name: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify_hashed(password, stored)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_issuer.issue(subject, name)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs the same hash computation as a real verification so that unknown
    /// usernames and wrong passwords take comparable time.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.compute_hash(password, &DECOY_SALT);
        AuthenticationError::InvalidCredentials
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token signature is invalid or the token has expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.token_issuer.verify(token)
    }
}
