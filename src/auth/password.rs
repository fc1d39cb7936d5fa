// Password hashing utilities
// Uses bcrypt; the salt is embedded in the hash string

use bcrypt::{hash, verify, BcryptError};

/// Hashes a password using bcrypt at the given cost
///
/// # Example
/// ```
/// use ecocycle_api::auth::password::hash_password;
///
/// let hash = hash_password("my_password", 4).expect("valid hash");
/// assert!(hash.starts_with("$2"));
/// ```
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

/// Verifies a password against a bcrypt hash
///
/// # Returns
/// * `Ok(bool)` - True if password matches, false otherwise
/// * `Err(BcryptError)` - If the stored hash is malformed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    verify(password, hash)
}
