//! PostgreSQL storage adapter.
//!
//! This module implements the repository traits defined in
//! `quicksnip-core` using PostgreSQL as the backing store.
//!
//! # Architecture
//!
//! - [`Database`] - Connection pool and migrations
//! - [`PgRepositories`] - Composite repository implementing `Repositories`
//! - Individual repos: `PgUserRepository`, `PgSnippetRepository`,
//!   `PgCommentRepository`
//!
//! # Usage
//!
//! ```ignore
//! let config = DatabaseConfig::for_api(&database_url);
//! let db = Database::connect(&config).await?;
//! db.migrate().await?;
//!
//! let repositories = PgRepositories::new(Arc::new(db));
//! ```

mod comment_repo;
mod database;
mod helpers;
mod snippet_repo;
mod user_repo;

pub use comment_repo::PgCommentRepository;
pub use database::{Database, DatabaseConfig};
pub use snippet_repo::PgSnippetRepository;
pub use user_repo::PgUserRepository;

use std::sync::Arc;

use quicksnip_core::ports::{
    CommentRepository, Repositories, SnippetRepository, UserRepository,
};

// =============================================================================
// Composite Repository
// =============================================================================

/// Aggregated PostgreSQL repositories implementing the `Repositories`
/// trait. Single entry point for all storage operations; every
/// individual repository shares the same pool.
pub struct PgRepositories {
    users: PgUserRepository,
    snippets: PgSnippetRepository,
    comments: PgCommentRepository,
}

impl PgRepositories {
    /// Create a new repository aggregate from a database connection.
    pub fn new(db: Arc<Database>) -> Self {
        let pool = db.pool().clone();
        Self {
            users: PgUserRepository::new(pool.clone()),
            snippets: PgSnippetRepository::new(pool.clone()),
            comments: PgCommentRepository::new(pool),
        }
    }
}

impl Repositories for PgRepositories {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn snippets(&self) -> &dyn SnippetRepository {
        &self.snippets
    }

    fn comments(&self) -> &dyn CommentRepository {
        &self.comments
    }
}
