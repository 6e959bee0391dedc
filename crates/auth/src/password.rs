//! Bcrypt implementation of the [`PasswordHasher`] port.

use quicksnip_core::error::{AuthError, AuthResult};
use quicksnip_core::ports::PasswordHasher;
use tracing::warn;

/// Bcrypt cost factor. 10 keeps sign-in latency tolerable for an
/// interactive flow while remaining a real work factor.
pub const BCRYPT_COST: u32 = 10;

/// Bcrypt-backed password hasher.
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new() -> Self {
        Self { cost: BCRYPT_COST }
    }

    /// Lower-cost hasher for tests.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> AuthResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| AuthError::Internal(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                // A stored hash that fails to parse counts as a mismatch,
                // not a server error.
                warn!(error = %e, "stored password hash failed to parse");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hasher = BcryptHasher::with_cost(4);
        let hash = hasher.hash("Str0ng!pass").unwrap();
        assert!(hasher.verify("Str0ng!pass", &hash));
        assert!(!hasher.verify("wrong-password", &hash));
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        let hasher = BcryptHasher::with_cost(4);
        assert!(!hasher.verify("anything", "not-a-bcrypt-hash"));
    }
}
