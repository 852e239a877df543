pub mod errors;
pub mod hashed;
pub mod hmac_sha512;

pub use errors::PasswordError;
pub use hashed::HashedPassword;
pub use hmac_sha512::PasswordHasher;
pub use hmac_sha512::HASH_LENGTH;
pub use hmac_sha512::SALT_LENGTH;
