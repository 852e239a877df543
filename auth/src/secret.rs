use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

/// Error type for signing secret validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Signing secret is missing")]
    Missing,

    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Signing secret has too little variety: minimum {min} distinct bytes, got {actual}")]
    LowEntropy { min: usize, actual: usize },

    #[error("Signing secret is a placeholder value")]
    Placeholder,
}

/// Validated key material for token signing.
///
/// Loaded once at startup and never mutated afterwards. Construction is the
/// only place the secret is checked, so a process holding a `SigningSecret`
/// is known to be correctly configured.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub const MIN_LENGTH: usize = 32;
    const MIN_DISTINCT_BYTES: usize = 8;
    const PLACEHOLDERS: [&'static str; 6] = [
        "changeme",
        "change-me",
        "change_me",
        "placeholder",
        "your-secret-key",
        "secret",
    ];

    /// Validate raw secret material.
    ///
    /// # Errors
    /// * `Missing` - Secret is empty or whitespace
    /// * `Placeholder` - Secret is, or is built around, a well-known placeholder
    /// * `TooShort` - Secret is shorter than `MIN_LENGTH` bytes
    /// * `LowEntropy` - Secret repeats too few distinct bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let secret = secret.into();

        if secret.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(SecretError::Missing);
        }

        if Self::is_placeholder(&secret) {
            return Err(SecretError::Placeholder);
        }

        if secret.len() < Self::MIN_LENGTH {
            return Err(SecretError::TooShort {
                min: Self::MIN_LENGTH,
                actual: secret.len(),
            });
        }

        let distinct = secret.iter().collect::<HashSet<_>>().len();
        if distinct < Self::MIN_DISTINCT_BYTES {
            return Err(SecretError::LowEntropy {
                min: Self::MIN_DISTINCT_BYTES,
                actual: distinct,
            });
        }

        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn is_placeholder(secret: &[u8]) -> bool {
        let normalized = String::from_utf8_lossy(secret).trim().to_lowercase();
        Self::PLACEHOLDERS.contains(&normalized.as_str())
            || normalized.contains("changeme")
            || normalized.contains("change-me")
            || normalized.contains("change_me")
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"[redacted]").finish()
    }
}
