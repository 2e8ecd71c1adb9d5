//! Password hashing utilities

use bcrypt::{hash, verify};

/// Lowest work factor bcrypt accepts. Fast enough for tests.
pub const MIN_COST: u32 = 4;

/// Hash a password using bcrypt with an explicit work factor
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}
