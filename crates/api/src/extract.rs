//! Request extractors.
//!
//! [`AuthUser`] decodes the caller's identity from the access token,
//! preferring an `Authorization: Bearer` header over the `accessToken`
//! cookie. [`ValidatedQuery`] wraps `axum::extract::Query` so malformed
//! query strings surface as the standard validation envelope instead of
//! axum's plain-text rejection.

use axum::extract::{FromRequestParts, Query};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use quicksnip_core::models::Identity;
use quicksnip_core::ports::{Cursor, OrderDirection, PageRequest};

use crate::cookies::ACCESS_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Authenticated Identity
// =============================================================================

/// The authenticated caller, decoded and verified from the access token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).or_else(|| {
            CookieJar::from_headers(&parts.headers)
                .get(ACCESS_COOKIE)
                .map(|cookie| cookie.value().to_string())
        });
        let Some(token) = token else {
            return Err(ApiError::Unauthorized("No token provided".into()));
        };
        let identity = state.tokens.verify_access(&token)?;
        Ok(Self(identity))
    }
}

// =============================================================================
// Validated Query
// =============================================================================

/// `Query` with rejections rewritten into the validation error envelope.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

// =============================================================================
// Pagination Parameters
// =============================================================================

/// Query parameters for snippet feeds, ordered by `(title, id)`.
///
/// `cursorId` and `cursorKey` replay the `nextCursor` object of the
/// previous page and must travel together.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetPageParams {
    pub limit: Option<i64>,
    pub cursor_id: Option<i64>,
    pub cursor_key: Option<String>,
    pub orderby: Option<String>,
}

impl SnippetPageParams {
    /// Build the validated page request; snippet feeds default to
    /// ascending title order.
    pub fn into_page_request(self) -> Result<PageRequest, ApiError> {
        let cursor = match (self.cursor_id, self.cursor_key) {
            (None, None) => None,
            (Some(id), Some(key)) => Some(Cursor::keyed(id, key)),
            _ => {
                return Err(ApiError::Validation(
                    "cursorId and cursorKey must be provided together".into(),
                ))
            }
        };
        let direction = OrderDirection::parse(self.orderby.as_deref(), OrderDirection::Asc)?;
        Ok(PageRequest::new(self.limit, cursor, direction)?)
    }
}

/// Query parameters for comment listings, ordered by `(created_at, id)`.
/// Comment ids are assigned in creation order, so the cursor is id-only.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPageParams {
    pub limit: Option<i64>,
    pub cursor_id: Option<i64>,
    pub orderby: Option<String>,
}

impl CommentPageParams {
    /// Build the validated page request; comment listings default to
    /// descending order (newest first).
    pub fn into_page_request(self) -> Result<PageRequest, ApiError> {
        let direction = OrderDirection::parse(self.orderby.as_deref(), OrderDirection::Desc)?;
        Ok(PageRequest::new(
            self.limit,
            self.cursor_id.map(Cursor::by_id),
            direction,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicksnip_core::ports::DEFAULT_LIMIT;

    #[test]
    fn snippet_params_require_full_cursor() {
        let params = SnippetPageParams {
            cursor_id: Some(4),
            ..Default::default()
        };
        let err = params.into_page_request().unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn snippet_params_default_ascending() {
        let req = SnippetPageParams::default().into_page_request().unwrap();
        assert_eq!(req.limit, DEFAULT_LIMIT);
        assert_eq!(req.direction, OrderDirection::Asc);
        assert!(req.cursor.is_none());
    }

    #[test]
    fn snippet_params_rebuild_cursor() {
        let params = SnippetPageParams {
            limit: Some(2),
            cursor_id: Some(7),
            cursor_key: Some("banana".into()),
            orderby: Some("desc".into()),
        };
        let req = params.into_page_request().unwrap();
        assert_eq!(req.cursor, Some(Cursor::keyed(7, "banana")));
        assert_eq!(req.direction, OrderDirection::Desc);
    }

    #[test]
    fn comment_params_default_descending() {
        let req = CommentPageParams::default().into_page_request().unwrap();
        assert_eq!(req.direction, OrderDirection::Desc);
    }

    #[test]
    fn comment_params_reject_bad_orderby() {
        let params = CommentPageParams {
            orderby: Some("upward".into()),
            ..Default::default()
        };
        assert!(params.into_page_request().is_err());
    }

    #[test]
    fn bearer_header_is_stripped() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn non_bearer_header_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcg==".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
