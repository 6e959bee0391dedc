//! JWT implementation of the [`TokenManager`] port.
//!
//! Two independent HMAC-SHA256 signers: the access signer mints
//! short-lived request credentials, the refresh signer mints the
//! long-lived credential that can re-mint access tokens. Verifying a
//! token against the wrong signer fails, so an access token can never
//! be replayed as a refresh token or vice versa.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use quicksnip_core::error::{AuthError, AuthResult};
use quicksnip_core::models::Identity;
use quicksnip_core::ports::{TokenManager, ACCESS_TTL_SECS, REFRESH_TTL_SECS};

/// Claims carried by both token kinds.
///
/// The identity payload is embedded whole so request handling needs no
/// user lookup: decoding the token *is* the session read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (matches `users.id`).
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Issued-at (Unix timestamp, seconds).
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds), enforced on verification.
    pub exp: i64,
}

impl Claims {
    fn new(identity: &Identity, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: identity.id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            iat: now,
            exp: now + ttl_secs,
        }
    }

    fn into_identity(self) -> Identity {
        Identity {
            id: self.id,
            username: self.username,
            email: self.email,
        }
    }
}

/// One signing key pair plus its TTL.
struct Signer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl Signer {
    fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    fn sign(&self, identity: &Identity) -> AuthResult<String> {
        let claims = Claims::new(identity, self.ttl_secs);
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    fn verify(&self, token: &str) -> AuthResult<Identity> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            },
        )?;
        Ok(data.claims.into_identity())
    }
}

/// Stateless dual-token manager backed by `jsonwebtoken`.
///
/// No revocation list is kept: a token is valid until its expiry, and
/// sign-out is purely cookie clearing on the client side.
pub struct JwtTokenManager {
    access: Signer,
    refresh: Signer,
}

impl JwtTokenManager {
    /// Build a manager with the default TTLs (1 hour / 7 days).
    pub fn new(access_secret: &str, refresh_secret: &str) -> Self {
        Self::with_ttls(
            access_secret,
            refresh_secret,
            ACCESS_TTL_SECS,
            REFRESH_TTL_SECS,
        )
    }

    /// Build a manager with explicit TTLs (tests shorten them).
    pub fn with_ttls(
        access_secret: &str,
        refresh_secret: &str,
        access_ttl_secs: i64,
        refresh_ttl_secs: i64,
    ) -> Self {
        Self {
            access: Signer::new(access_secret, access_ttl_secs),
            refresh: Signer::new(refresh_secret, refresh_ttl_secs),
        }
    }
}

impl TokenManager for JwtTokenManager {
    fn issue_access(&self, identity: &Identity) -> AuthResult<String> {
        self.access.sign(identity)
    }

    fn issue_refresh(&self, identity: &Identity) -> AuthResult<String> {
        self.refresh.sign(identity)
    }

    fn verify_access(&self, token: &str) -> AuthResult<Identity> {
        self.access.verify(token)
    }

    fn verify_refresh(&self, token: &str) -> AuthResult<Identity> {
        self.refresh.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            id: 42,
            username: "ferris1".into(),
            email: "ferris@example.com".into(),
        }
    }

    #[test]
    fn issue_then_verify_preserves_identity() {
        let mgr = JwtTokenManager::new("access-secret", "refresh-secret");
        let token = mgr.issue_access(&identity()).unwrap();
        let decoded = mgr.verify_access(&token).unwrap();
        assert_eq!(decoded, identity());
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let mgr = JwtTokenManager::new("access-secret", "refresh-secret");
        let other = JwtTokenManager::new("different-secret", "refresh-secret");
        let token = mgr.issue_access(&identity()).unwrap();
        assert!(matches!(
            other.verify_access(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    // Test critique: un access token ne doit jamais passer pour un refresh token
    #[test]
    fn access_token_rejected_by_refresh_verifier() {
        let mgr = JwtTokenManager::new("access-secret", "refresh-secret");
        let access = mgr.issue_access(&identity()).unwrap();
        assert!(matches!(
            mgr.verify_refresh(&access),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_reports_expiry() {
        // TTL well past the default 60s validation leeway
        let mgr = JwtTokenManager::with_ttls("a", "r", -120, -120);
        let token = mgr.issue_access(&identity()).unwrap();
        assert!(matches!(
            mgr.verify_access(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn expired_access_valid_refresh_re_mints() {
        // Access tokens expire immediately, refresh tokens stay valid
        let mgr = JwtTokenManager::with_ttls("a", "r", -120, 3600);
        let access = mgr.issue_access(&identity()).unwrap();
        let refresh = mgr.issue_refresh(&identity()).unwrap();

        assert!(mgr.verify_access(&access).is_err());
        let recovered = mgr.verify_refresh(&refresh).unwrap();

        let fresh = JwtTokenManager::new("a", "r");
        let new_access = fresh.issue_access(&recovered).unwrap();
        assert_eq!(fresh.verify_access(&new_access).unwrap(), identity());
    }

    #[test]
    fn garbage_token_is_invalid_not_fatal() {
        let mgr = JwtTokenManager::new("a", "r");
        assert!(matches!(
            mgr.verify_access("not.a.jwt"),
            Err(AuthError::InvalidToken)
        ));
    }
}
