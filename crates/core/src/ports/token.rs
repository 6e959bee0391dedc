//! Port traits for token signing and password hashing.
//!
//! The session design is stateless: identity lives entirely in two
//! signed bearer tokens, and sign-out is cookie clearing. Isolating the
//! signing primitive behind a trait keeps call sites unchanged if a
//! revocation store is ever added.

use crate::error::AuthResult;
use crate::models::Identity;

/// Access-token lifetime: one hour.
pub const ACCESS_TTL_SECS: i64 = 60 * 60;

/// Refresh-token lifetime: seven days.
pub const REFRESH_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Dual-token signer/verifier.
///
/// Access and refresh tokens carry the same identity payload but are
/// signed with distinct secrets and distinct TTLs, so an expired or
/// stolen access token can never stand in for a refresh token.
pub trait TokenManager: Send + Sync {
    /// Sign a short-lived access token for the identity.
    fn issue_access(&self, identity: &Identity) -> AuthResult<String>;

    /// Sign a long-lived refresh token for the identity.
    fn issue_refresh(&self, identity: &Identity) -> AuthResult<String>;

    /// Verify signature and expiry against the access secret.
    fn verify_access(&self, token: &str) -> AuthResult<Identity>;

    /// Verify signature and expiry against the refresh secret.
    fn verify_refresh(&self, token: &str) -> AuthResult<Identity>;
}

/// Password hashing primitive.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, password: &str) -> AuthResult<String>;

    /// Check a plaintext password against a stored hash. Any hash-parse
    /// failure counts as a mismatch.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
