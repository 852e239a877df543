use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by an access token.
///
/// Immutable once issued: a token is either valid (correct signature and
/// `now < exp`) or it is not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (credential identifier)
    pub sub: String,

    /// Normalized username
    pub name: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an authenticated credential.
    ///
    /// # Arguments
    /// * `subject` - Credential identifier
    /// * `name` - Normalized username
    /// * `issued_at` - Issuance instant
    /// * `lifetime` - Time until the token expires
    pub fn for_credential(
        subject: impl ToString,
        name: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let expiration = issued_at + lifetime;

        Self {
            sub: subject.to_string(),
            name: name.into(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the token is expired at the given Unix timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
