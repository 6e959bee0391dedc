//! Account and session handlers.
//!
//! Sessions are fully stateless: identity lives in the two signed token
//! cookies. Signup and signin first try to resume an existing session
//! from the cookies, transparently rotating both tokens when the access
//! token has expired but the refresh token is still valid. Signout only
//! clears the cookies.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use quicksnip_core::error::{AuthError, DomainError};
use quicksnip_core::models::{Identity, NewUser};
use quicksnip_core::validate;

use crate::cookies::{ACCESS_COOKIE, REFRESH_COOKIE};
use crate::error::{ApiError, ApiResult, SuccessBody};
use crate::extract::AuthUser;
use crate::state::AppState;

// =============================================================================
// Request Payloads
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    #[serde(default)]
    pub username: String,
}

// =============================================================================
// Session Resumption
// =============================================================================

/// Try to answer a signup/signin request from the cookies alone.
///
/// A valid access token answers with the existing tokens, re-setting
/// the cookies so their max-age restarts. An expired access token (or a
/// missing one) with a valid refresh token rotates both tokens.
/// Anything else falls through to the actual signup/signin flow;
/// resumption never fails a request.
fn resume_session(state: &AppState, jar: &CookieJar) -> Option<Response> {
    let access = jar.get(ACCESS_COOKIE).map(|c| c.value().to_string());
    let refresh = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());

    let respond = |identity: Identity, access: String, refresh: Option<String>| -> Response {
        let mut jar = CookieJar::new().add(state.cookies.access(access.clone()));
        if let Some(refresh) = refresh {
            jar = jar.add(state.cookies.refresh(refresh));
        }
        (jar, session_validated(&identity, &access)).into_response()
    };

    let rotate = |identity: Identity| -> Option<Response> {
        let access = state.tokens.issue_access(&identity).ok()?;
        let refresh = state.tokens.issue_refresh(&identity).ok()?;
        debug!(user_id = identity.id, "session resumed via refresh token");
        Some(respond(identity, access, Some(refresh)))
    };

    match access {
        Some(token) => match state.tokens.verify_access(&token) {
            Ok(identity) => Some(respond(identity, token, refresh)),
            Err(AuthError::TokenExpired) => {
                let identity = state.tokens.verify_refresh(&refresh?).ok()?;
                rotate(identity)
            }
            Err(_) => None,
        },
        None => {
            let identity = state.tokens.verify_refresh(&refresh?).ok()?;
            rotate(identity)
        }
    }
}

fn session_validated(identity: &Identity, access_token: &str) -> Response {
    SuccessBody::new(
        "User session validated",
        json!({
            "user": identity,
            "tokens": { "accessToken": access_token },
        }),
    )
    .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /api/users/signup`
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignupRequest>,
) -> ApiResult<Response> {
    if let Some(resumed) = resume_session(&state, &jar) {
        return Ok(resumed);
    }

    validate::username(&body.username)?;
    validate::email(&body.email)?;
    validate::password(&body.password)?;

    let password_hash = state.passwords.hash(&body.password)?;
    let user = state
        .repos
        .users()
        .insert_user(&NewUser {
            username: body.username,
            email: body.email,
            password_hash,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        SuccessBody::new("User signed up successfully", json!({ "user": user })),
    )
        .into_response())
}

/// `POST /api/users/signin`
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SigninRequest>,
) -> ApiResult<Response> {
    if let Some(resumed) = resume_session(&state, &jar) {
        return Ok(resumed);
    }

    validate::email(&body.email)?;
    if body.password.len() < 8 {
        return Err(DomainError::Validation(
            "Password must be at least 8 characters".into(),
        )
        .into());
    }

    let user = state
        .repos
        .users()
        .find_by_email(&body.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".into()))?;

    if !state.passwords.verify(&body.password, &user.password_hash) {
        return Err(ApiError::Unauthorized("Invalid email or password".into()));
    }

    let identity = Identity {
        id: user.id,
        username: user.username,
        email: user.email,
    };
    let access = state.tokens.issue_access(&identity)?;
    let refresh = state.tokens.issue_refresh(&identity)?;

    let jar = CookieJar::new()
        .add(state.cookies.access(access.clone()))
        .add(state.cookies.refresh(refresh));

    Ok((
        jar,
        SuccessBody::new(
            "User signed in successfully",
            json!({
                "user": identity,
                "tokens": { "accessToken": access },
            }),
        ),
    )
        .into_response())
}

/// `POST /api/users/signout`
///
/// Stateless by design: tokens are not revoked, only the cookies are
/// replaced with expired ones.
pub async fn signout(State(state): State<AppState>) -> Response {
    let jar = CookieJar::new()
        .add(state.cookies.clear(ACCESS_COOKIE))
        .add(state.cookies.clear(REFRESH_COOKIE));
    (
        jar,
        SuccessBody::new("User logged out successfully", json!(null)),
    )
        .into_response()
}

/// `DELETE /api/users/delete`
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(body): Json<DeleteAccountRequest>,
) -> ApiResult<Response> {
    if body.username.is_empty() {
        return Err(ApiError::Validation("Username is required".into()));
    }
    if identity.username != body.username {
        return Err(ApiError::Forbidden(
            "You can only delete your own account".into(),
        ));
    }

    let user = state
        .repos
        .users()
        .delete_by_username(&body.username)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(SuccessBody::new(
        "User account deleted successfully",
        json!({ "user": user }),
    )
    .into_response())
}

/// `GET /api/users/check-session`
///
/// Cookie-only probe used by the frontend on load. Responds with a flat
/// body rather than the data envelope, and never consults the refresh
/// token.
pub async fn check_session(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(cookie) = jar.get(ACCESS_COOKIE) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Not signed in" })),
        )
            .into_response();
    };

    match state.tokens.verify_access(cookie.value()) {
        Ok(identity) => Json(json!({
            "success": true,
            "message": "User is signed in",
            "user": identity,
        }))
        .into_response(),
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid or expired token" })),
        )
            .into_response(),
    }
}

/// `POST /api/users/refresh`
///
/// Explicit refresh: mint a new access token from a valid refresh
/// cookie. The refresh token itself is not rotated here.
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> ApiResult<Response> {
    let Some(cookie) = jar.get(REFRESH_COOKIE) else {
        return Err(ApiError::Unauthorized("Refresh token missing".into()));
    };

    let identity = state
        .tokens
        .verify_refresh(cookie.value())
        .map_err(|_| ApiError::Unauthorized("Invalid refresh token".into()))?;

    let access = state.tokens.issue_access(&identity)?;
    let jar = CookieJar::new().add(state.cookies.access(access));

    Ok((jar, SuccessBody::new("Access token refreshed", json!(null))).into_response())
}
