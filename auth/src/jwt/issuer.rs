use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;
use crate::secret::SigningSecret;

/// Fixed lifetime of an access token.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Issues and verifies identity tokens.
///
/// Tokens are stateless bearer credentials: possession is enough, and they
/// stop being valid once `exp` is reached.
pub struct TokenIssuer {
    handler: JwtHandler,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            lifetime: Duration::hours(TOKEN_LIFETIME_HOURS),
        }
    }

    /// Issue a signed token for a credential, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: impl ToString, name: &str) -> Result<String, JwtError> {
        self.issue_at(subject, name, Utc::now())
    }

    /// Issue a signed token as of `issued_at`.
    pub fn issue_at(
        &self,
        subject: impl ToString,
        name: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_credential(subject, name, issued_at, self.lifetime);
        self.handler.encode(&claims)
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `DecodingFailed` - Signature or format is invalid
    /// * `TokenExpired` - `exp` has been reached
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as of `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let claims: Claims = self.handler.decode(token)?;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
