//! Port traits for data repositories.
//!
//! These traits define the storage interface used by the domain layer.
//! Implementations live in the infrastructure layer (`quicksnip-storage`
//! for PostgreSQL, in-memory fakes in tests).

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::models::{
    Comment, CommentView, NewComment, NewSnippet, NewUser, PublicUser, Snippet, SnippetUpdate,
    User,
};

use super::pagination::{Page, PageRequest};

// =============================================================================
// Filter Types
// =============================================================================

/// Domain predicate for snippet listings, combined (logical AND) with the
/// cursor seek predicate before translation to a query.
///
/// An explicit enumeration instead of optional-field soup keeps every
/// listing variant visible and testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetFilter {
    /// The public feed: every snippet.
    All,
    /// Snippets published by one author.
    Author(i64),
    /// Snippets whose tag list contains any of the given fragments
    /// (OR of substring matches).
    TagsAny(Vec<String>),
    /// Snippets whose title starts with the given prefix.
    TitlePrefix(String),
}

// =============================================================================
// Repository Traits
// =============================================================================

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, returning the public projection.
    ///
    /// A username/email collision surfaces as
    /// [`StorageError::ConstraintViolation`](crate::error::StorageError::ConstraintViolation).
    async fn insert_user(&self, user: &NewUser) -> StorageResult<PublicUser>;

    /// Look up a user by email (sign-in path).
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>>;

    /// Look up a user by username.
    async fn find_by_username(&self, username: &str) -> StorageResult<Option<User>>;

    /// Delete a user by username, returning the deleted public
    /// projection, or `None` if no such user existed.
    async fn delete_by_username(&self, username: &str) -> StorageResult<Option<PublicUser>>;
}

/// Repository for snippets.
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Insert a snippet. A duplicate title surfaces as a constraint
    /// violation; the handler-level pre-check is only a fast path.
    async fn insert_snippet(&self, snippet: &NewSnippet) -> StorageResult<Snippet>;

    /// Get a snippet by id.
    async fn get_snippet(&self, id: i64) -> StorageResult<Option<Snippet>>;

    /// Fast-path duplicate check before insert. Not atomic with the
    /// insert; the unique index is the source of truth.
    async fn title_exists(&self, title: &str) -> StorageResult<bool>;

    /// Update an owned snippet. Returns `None` when the snippet does not
    /// exist or is not owned by `user_id`.
    async fn update_snippet(
        &self,
        id: i64,
        user_id: i64,
        update: &SnippetUpdate,
    ) -> StorageResult<Option<Snippet>>;

    /// Delete an owned snippet. Returns whether a row was deleted.
    async fn delete_snippet(&self, id: i64, user_id: i64) -> StorageResult<bool>;

    /// Keyset-paginated listing ordered by `(title, id)`.
    ///
    /// The total count is computed from `filter` alone, never from the
    /// cursor.
    async fn list_snippets(
        &self,
        filter: SnippetFilter,
        page: PageRequest,
    ) -> StorageResult<Page<Snippet>>;
}

/// Repository for comments.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment on an existing snippet.
    async fn insert_comment(&self, comment: &NewComment) -> StorageResult<Comment>;

    /// Keyset-paginated listing of a snippet's comments ordered by
    /// `(created_at, id)`, joined with each author's username and avatar.
    async fn list_comments(
        &self,
        snippet_id: i64,
        page: PageRequest,
    ) -> StorageResult<Page<CommentView>>;
}

// =============================================================================
// Composite Repository
// =============================================================================

/// Combined repository access, injected into the API layer at
/// construction so handlers never touch a global datastore client.
pub trait Repositories: Send + Sync {
    /// Access the user repository.
    fn users(&self) -> &dyn UserRepository;

    /// Access the snippet repository.
    fn snippets(&self) -> &dyn SnippetRepository;

    /// Access the comment repository.
    fn comments(&self) -> &dyn CommentRepository;
}
