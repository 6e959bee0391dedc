//! Storage layer for QuickSnip.
//!
//! This crate provides PostgreSQL implementations of the repository
//! traits defined in `quicksnip-core`. It handles all database
//! interactions including connection pooling, migrations, and the
//! keyset-paginated listing queries.
//!
//! # Architecture
//!
//! The storage layer follows the repository pattern:
//!
//! - [`postgres::Database`] - Connection pool management
//! - [`postgres::PgRepositories`] - Composite repository for all entity types
//! - Individual repositories for users, snippets, and comments

pub mod postgres;

pub use postgres::{Database, DatabaseConfig, PgRepositories};
