//! Session cookie construction.
//!
//! Both tokens travel as httpOnly cookies with `SameSite=None` so the
//! known frontend origin can use them cross-site; `Secure` is switched
//! off only for local development. Sign-out is nothing more than
//! replacing both cookies with expired ones - there is no server-side
//! session state to clear.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use quicksnip_core::ports::{ACCESS_TTL_SECS, REFRESH_TTL_SECS};

/// Cookie carrying the access token.
pub const ACCESS_COOKIE: &str = "accessToken";

/// Cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Environment-dependent cookie attributes.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    /// `Secure` flag; true outside local development.
    pub secure: bool,
}

impl CookiePolicy {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// Access-token cookie, max-age one hour.
    pub fn access(&self, token: String) -> Cookie<'static> {
        self.build(ACCESS_COOKIE, token, ACCESS_TTL_SECS)
    }

    /// Refresh-token cookie, max-age seven days.
    pub fn refresh(&self, token: String) -> Cookie<'static> {
        self.build(REFRESH_COOKIE, token, REFRESH_TTL_SECS)
    }

    /// Expired replacement used to clear a session cookie.
    pub fn clear(&self, name: &'static str) -> Cookie<'static> {
        self.build(name, String::new(), 0)
    }

    fn build(&self, name: &'static str, value: String, max_age_secs: i64) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::None)
            .path("/")
            .max_age(Duration::seconds(max_age_secs))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_cookie_attributes() {
        let policy = CookiePolicy::new(true);
        let cookie = policy.access("tok".into());
        assert_eq!(cookie.name(), "accessToken");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let policy = CookiePolicy::new(false);
        let cookie = policy.clear(REFRESH_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
