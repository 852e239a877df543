use std::fmt;

use super::errors::PasswordError;
use super::hmac_sha512::HASH_LENGTH;

/// A password hash together with the salt it was keyed by.
///
/// Hash and salt only exist as a pair: there is no way to build one without
/// the other, and the hash length is checked on construction.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: [u8; HASH_LENGTH],
    salt: Vec<u8>,
}

impl HashedPassword {
    /// Rebuild a stored hash/salt pair.
    ///
    /// # Errors
    /// * `MalformedHash` - Hash is not `HASH_LENGTH` bytes or salt is empty
    pub fn from_parts(hash: Vec<u8>, salt: Vec<u8>) -> Result<Self, PasswordError> {
        let hash: [u8; HASH_LENGTH] = hash.try_into().map_err(|h: Vec<u8>| {
            PasswordError::MalformedHash(format!(
                "expected {} bytes of hash, got {}",
                HASH_LENGTH,
                h.len()
            ))
        })?;

        if salt.is_empty() {
            return Err(PasswordError::MalformedHash("salt is empty".to_string()));
        }

        Ok(Self { hash, salt })
    }

    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[redacted]")
            .field("salt", &"[redacted]")
            .finish()
    }
}
