//! Shared application state.

use std::sync::Arc;

use quicksnip_core::ports::{PasswordHasher, Repositories, TokenManager};

use crate::cookies::CookiePolicy;

/// State injected into every handler.
///
/// Repositories, the token manager, and the password hasher are all
/// trait objects wired up at startup, so handlers never reach for a
/// global datastore client and tests can swap in in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn Repositories>,
    pub tokens: Arc<dyn TokenManager>,
    pub passwords: Arc<dyn PasswordHasher>,
    pub cookies: CookiePolicy,
}

impl AppState {
    pub fn new(
        repos: Arc<dyn Repositories>,
        tokens: Arc<dyn TokenManager>,
        passwords: Arc<dyn PasswordHasher>,
        cookies: CookiePolicy,
    ) -> Self {
        Self {
            repos,
            tokens,
            passwords,
            cookies,
        }
    }
}
