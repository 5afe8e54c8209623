//! Password hashing behind a narrow interface
//!
//! Resolvers hand plaintext to a [`CredentialHasher`] and only ever pass the
//! resulting digest on to the user store.

use thiserror::Error;

/// bcrypt work factor used for new digests
pub const SIGNUP_COST: u32 = 10;

/// Password hashing errors
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Failed to parse password hash: {0}")]
    Parse(String),
}

/// Hashes and verifies user passwords
pub trait CredentialHasher: Send + Sync {
    /// Produce a self-describing digest for `plain`
    fn hash(&self, plain: &str) -> Result<String, PasswordError>;

    /// Check `plain` against a digest produced by [`CredentialHasher::hash`]
    fn verify(&self, plain: &str, digest: &str) -> Result<bool, PasswordError>;
}

/// bcrypt hasher producing `$2b$` digests
///
/// Verification accepts the `$2a$`, `$2b$` and `$2y$` variants.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a hasher with an explicit work factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(SIGNUP_COST)
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, plain: &str) -> Result<String, PasswordError> {
        bcrypt::hash(plain, self.cost).map_err(|e| PasswordError::Hash(e.to_string()))
    }

    fn verify(&self, plain: &str, digest: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(plain, digest).map_err(|e| PasswordError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcrypt::Version;

    // Lowest cost bcrypt accepts
    fn hasher() -> BcryptHasher {
        BcryptHasher::new(4)
    }

    #[test]
    fn test_default_cost() {
        assert_eq!(BcryptHasher::default().cost(), 10);
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let digest = hasher.hash("s3cret-pass").unwrap();

        assert!(digest.starts_with("$2b$04$"));
        assert_eq!(digest.len(), 60);
        assert!(hasher.verify("s3cret-pass", &digest).unwrap());
        assert!(!hasher.verify("wrong-pass", &digest).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = hasher();
        let first = hasher.hash("same").unwrap();
        let second = hasher.hash("same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_2a_digests() {
        let hasher = BcryptHasher::default();

        // OpenBSD reference vector
        assert!(
            hasher
                .verify("U*U", "$2a$05$CCCCCCCCCCCCCCCCCCCCC.E5YPO9kmyuRGyh0XouQYb4YMJKvyOeW")
                .unwrap()
        );

        let digest = bcrypt::hash_with_result("legacy-pass", 10)
            .unwrap()
            .format_for_version(Version::TwoA);
        assert!(digest.starts_with("$2a$10$"));
        assert!(hasher.verify("legacy-pass", &digest).unwrap());

        let stored = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";
        assert!(!hasher.verify("wrong-pass", stored).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_digest() {
        let result = hasher().verify("anything", "not-a-bcrypt-digest");
        assert!(matches!(result, Err(PasswordError::Parse(_))));
    }
}
