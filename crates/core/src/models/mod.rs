//! Domain models for users, snippets, and comments.
//!
//! These models are storage-agnostic and represent the canonical
//! form of application data within the domain layer. Wire-facing
//! types serialize with camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Users
// =============================================================================

/// A registered user, including the stored credential hash.
///
/// Never serialized to the wire directly; use [`PublicUser`] for responses.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
}

impl User {
    /// Strip credential material for wire responses.
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username,
            email: self.email,
            avatar_url: self.avatar_url,
        }
    }
}

/// User representation safe for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

/// New user registration data. The password has already been hashed
/// by the time this reaches a repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// The identity encoded into access and refresh tokens.
///
/// This is the full session payload: possession of a token carrying
/// these claims is sufficient to act as the user (stateless design,
/// no server-side session record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub email: String,
}

// =============================================================================
// Snippets
// =============================================================================

/// A published code/markdown snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: i64,
    /// Unique across all snippets.
    pub title: String,
    pub markdown: String,
    pub description: Option<String>,
    /// Comma-separated tag list, matched by substring in tag search.
    pub tags: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a snippet.
#[derive(Debug, Clone)]
pub struct NewSnippet {
    pub title: String,
    pub markdown: String,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub user_id: i64,
}

/// Partial update to an owned snippet. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct SnippetUpdate {
    pub title: Option<String>,
    pub markdown: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
}

// =============================================================================
// Comments
// =============================================================================

/// A comment on a snippet.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i64,
    pub snippet_id: i64,
    pub user_id: Option<i64>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment joined with its author, as returned by listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub comment: String,
    pub commented_by: Option<i64>,
    /// The snippet this comment belongs to.
    pub commented_on: i64,
    pub username: Option<String>,
    pub user_avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for posting a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub snippet_id: i64,
    pub user_id: i64,
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_public_drops_password_hash() {
        let user = User {
            id: 7,
            username: "ferris1".into(),
            email: "ferris@example.com".into(),
            password_hash: "$2b$10$abc".into(),
            avatar_url: None,
        };
        let public = user.into_public();
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("ferris1"));
    }

    #[test]
    fn wire_models_use_camel_case() {
        let view = CommentView {
            id: 1,
            comment: "nice".into(),
            commented_by: Some(2),
            commented_on: 3,
            username: Some("ferris1".into()),
            user_avatar: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("commentedBy"));
        assert!(json.contains("commentedOn"));
        assert!(json.contains("userAvatar"));
    }
}
