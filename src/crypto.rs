//! Password hashing and opaque token generation.

use argon2::{Algorithm, Argon2, Params, PasswordVerifier, Version};
use password_hash::{PasswordHash, PasswordHasher as ArgonPasswordHasher, SaltString};
use rand::rngs::OsRng;

use crate::AuthError;

/// Default session token length in characters.
///
/// 32 alphanumeric characters carry roughly 190 bits of entropy, comfortably
/// above the 122 bits needed to make collisions negligible.
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Trait for password hashing and verification.
///
/// This trait allows pluggable password hashing implementations.
/// The default implementation is [`Argon2Hasher`].
///
/// Both operations are CPU-bound by design and may take tens of milliseconds;
/// callers on an async runtime should run them via
/// `tokio::task::spawn_blocking` so they do not stall the request threads.
/// [`AuthFlow`](crate::AuthFlow) does this for you.
///
/// # Example
///
/// ```rust
/// use doorman::{Argon2Hasher, PasswordHasher};
///
/// let hasher = Argon2Hasher::default();
/// let hash = hasher.hash("mypassword").unwrap();
/// assert!(hasher.verify("mypassword", &hash).unwrap());
/// assert!(!hasher.verify("wrongpassword", &hash).unwrap());
/// ```
pub trait PasswordHasher: Send + Sync {
    /// Hash a password with a fresh random salt embedded in the output.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if hashing fails.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    ///
    /// A wrong password yields `Ok(false)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if the stored hash is malformed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Argon2id password hasher with configurable parameters.
///
/// # Example
///
/// ```rust
/// use doorman::Argon2Hasher;
///
/// // Default settings (19 MiB memory, 2 iterations, 1 thread)
/// let hasher = Argon2Hasher::default();
///
/// // Production settings (OWASP 2024 recommendations)
/// let hasher = Argon2Hasher::production();
///
/// // Custom settings
/// let hasher = Argon2Hasher::new(32768, 4, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    /// Memory cost in KiB
    memory_cost: u32,
    /// Number of iterations
    time_cost: u32,
    /// Degree of parallelism
    parallelism: u32,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            memory_cost: 19456, // 19 MiB - argon2 default
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl Argon2Hasher {
    /// Creates a new hasher with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `memory_cost` - Memory usage in KiB
    /// * `time_cost` - Number of iterations
    /// * `parallelism` - Number of threads
    #[must_use]
    pub fn new(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    /// Production-recommended settings based on OWASP 2024 guidelines.
    ///
    /// Parameters: 64 MiB memory, 3 iterations, 4 threads.
    #[must_use]
    pub fn production() -> Self {
        Self {
            memory_cost: 65536, // 64 MiB
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|_| AuthError::PasswordHashError)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| AuthError::PasswordHashError)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHashError)?;

        // Verification uses params and salt embedded in the hash, not from
        // config, and compares in constant time.
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Generates a cryptographically secure random token.
///
/// The token consists of alphanumeric characters (a-z, A-Z, 0-9),
/// providing approximately 5.95 bits of entropy per character.
///
/// # Example
///
/// ```rust
/// use doorman::crypto::generate_token;
///
/// let token = generate_token(32);
/// assert_eq!(token.len(), 32);
/// ```
pub fn generate_token(length: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> Argon2Hasher {
        // Minimal cost parameters; these tests exercise correctness, not cost.
        Argon2Hasher::new(1024, 1, 1)
    }

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hasher = fast_hasher();
        let hash = hasher.hash("Str0ng!Pass").unwrap();
        assert!(hasher.verify("Str0ng!Pass", &hash).unwrap());
    }

    #[test]
    fn test_verify_wrong_password_is_false_not_error() {
        let hasher = fast_hasher();
        let hash = hasher.hash("Str0ng!Pass").unwrap();
        assert_eq!(hasher.verify("wrong-password", &hash), Ok(false));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = fast_hasher();
        let hash1 = hasher.hash("samepassword").unwrap();
        let hash2 = hasher.hash("samepassword").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_malformed_hash() {
        let hasher = fast_hasher();
        assert_eq!(
            hasher.verify("password", "not-a-phc-string"),
            Err(AuthError::PasswordHashError)
        );
    }

    #[test]
    fn test_generate_token_length() {
        let token = generate_token(32);
        assert_eq!(token.len(), 32);

        let token = generate_token(48);
        assert_eq!(token.len(), 48);
    }

    #[test]
    fn test_generate_token_unique() {
        let token1 = generate_token(32);
        let token2 = generate_token(32);
        assert_ne!(token1, token2);
    }

    #[test]
    fn test_generate_token_alphanumeric() {
        let token = generate_token(100);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
