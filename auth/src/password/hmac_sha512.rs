use hmac::Hmac;
use hmac::Mac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;

use super::errors::PasswordError;
use super::hashed::HashedPassword;

type HmacSha512 = Hmac<Sha512>;

/// Size of a password hash in bytes (SHA-512 output size).
pub const HASH_LENGTH: usize = 64;

/// Size of a generated salt in bytes (SHA-512 block size, so the salt is used
/// as an HMAC key without being pre-hashed).
pub const SALT_LENGTH: usize = 128;

/// Password hashing implementation.
///
/// Derives password hashes with HMAC-SHA512 keyed by a random per-credential salt.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh salt from the operating system CSPRNG.
    ///
    /// # Returns
    /// `SALT_LENGTH` random bytes
    pub fn generate_salt(&self) -> Vec<u8> {
        let mut salt = vec![0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut salt);
        salt
    }

    /// Compute the HMAC-SHA512 of the UTF-8 bytes of `password`, keyed by `salt`.
    ///
    /// Deterministic for a fixed (password, salt) pair. Empty passwords are
    /// hashed like any other string.
    ///
    /// # Errors
    /// * `HashingFailed` - The MAC could not be keyed
    pub fn compute_hash(
        &self,
        password: &str,
        salt: &[u8],
    ) -> Result<[u8; HASH_LENGTH], PasswordError> {
        let mut mac = Self::keyed(salt)?;
        mac.update(password.as_bytes());

        let mut hash = [0u8; HASH_LENGTH];
        hash.copy_from_slice(&mac.finalize().into_bytes());
        Ok(hash)
    }

    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// # Returns
    /// Hash and salt bundled together, ready to be persisted
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<HashedPassword, PasswordError> {
        let salt = self.generate_salt();
        let hash = self.compute_hash(password, &salt)?;
        HashedPassword::from_parts(hash.to_vec(), salt)
    }

    /// Verify a password against a stored hash/salt pair.
    ///
    /// The comparison runs in constant time with respect to the stored hash.
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `HashingFailed` - The MAC could not be keyed
    pub fn verify(&self, password: &str, hash: &[u8], salt: &[u8]) -> Result<bool, PasswordError> {
        // verify_slice accepts truncated tags
        if hash.len() != HASH_LENGTH {
            return Ok(false);
        }

        let mut mac = Self::keyed(salt)?;
        mac.update(password.as_bytes());

        Ok(mac.verify_slice(hash).is_ok())
    }

    /// Verify a password against a stored [`HashedPassword`].
    pub fn verify_hashed(
        &self,
        password: &str,
        stored: &HashedPassword,
    ) -> Result<bool, PasswordError> {
        self.verify(password, stored.hash(), stored.salt())
    }

    fn keyed(salt: &[u8]) -> Result<HmacSha512, PasswordError> {
        HmacSha512::new_from_slice(salt).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let salt = hasher.generate_salt();
        let hash = hasher
            .compute_hash(password, &salt)
            .expect("Failed to hash password");

        assert!(hasher
            .verify(password, &hash, &salt)
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &hash, &salt)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_bundles_salt_and_digest() {
        let hasher = PasswordHasher::new();

        let stored = hasher.hash("Secr3t!").expect("Failed to hash password");

        assert_eq!(stored.hash().len(), HASH_LENGTH);
        assert_eq!(stored.salt().len(), SALT_LENGTH);
        assert!(hasher.verify_hashed("Secr3t!", &stored).unwrap());
        assert!(!hasher.verify_hashed("secr3t!", &stored).unwrap());
    }

    #[test]
    fn test_compute_hash_is_deterministic() {
        let hasher = PasswordHasher::new();
        let salt = hasher.generate_salt();

        let first = hasher.compute_hash("password", &salt).unwrap();
        let second = hasher.compute_hash("password", &salt).unwrap();
        assert_eq!(first, second);

        let other_salt = hasher.generate_salt();
        let third = hasher.compute_hash("password", &other_salt).unwrap();
        assert_ne!(first, third);
    }

    #[test]
    fn test_compute_hash_matches_rfc4231_vector() {
        let hasher = PasswordHasher::new();

        let hash = hasher
            .compute_hash("what do ya want for nothing?", b"Jefe")
            .unwrap();

        assert_eq!(
            to_hex(&hash),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_empty_password_is_hashed() {
        let hasher = PasswordHasher::new();
        let salt = hasher.generate_salt();

        let hash = hasher.compute_hash("", &salt).unwrap();

        assert!(hasher.verify("", &hash, &salt).unwrap());
        assert!(!hasher.verify(" ", &hash, &salt).unwrap());
    }

    #[test]
    fn test_verify_rejects_truncated_hash() {
        let hasher = PasswordHasher::new();
        let salt = hasher.generate_salt();
        let hash = hasher.compute_hash("password", &salt).unwrap();

        assert!(!hasher.verify("password", &hash[..32], &salt).unwrap());
        assert!(!hasher.verify("password", &[], &salt).unwrap());
    }

    #[test]
    fn test_verify_rejects_single_bit_flip() {
        let hasher = PasswordHasher::new();
        let salt = hasher.generate_salt();
        let hash = hasher.compute_hash("password", &salt).unwrap();

        for i in 0..HASH_LENGTH {
            let mut tampered = hash;
            tampered[i] ^= 0x01;
            assert!(!hasher.verify("password", &tampered, &salt).unwrap());
        }
    }

    #[test]
    fn test_generated_salts_are_unique() {
        let hasher = PasswordHasher::new();

        let salts: HashSet<Vec<u8>> = (0..1_000).map(|_| hasher.generate_salt()).collect();

        assert_eq!(salts.len(), 1_000);
        assert!(salts.iter().all(|salt| salt.len() == SALT_LENGTH));
    }
}
