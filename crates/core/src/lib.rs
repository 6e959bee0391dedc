//! Core domain layer for QuickSnip.
//!
//! This crate contains the domain models, port traits (interfaces), and
//! the cursor pagination engine for the snippet-sharing API. It follows
//! hexagonal architecture principles - this is the innermost layer with
//! no dependencies on infrastructure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    quicksnip (binary)                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │   quicksnip-api          │         quicksnip-auth           │
//! │   (axum HTTP)            │         (JWT + bcrypt)           │
//! ├──────────────────────────┴──────────────────────────────────┤
//! │                   quicksnip-storage                         │
//! │                     (PostgreSQL)                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   quicksnip-core  ← YOU ARE HERE            │
//! │           (models, ports, pagination, validation)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`models`] - Domain models (User, Snippet, Comment, Identity)
//! - [`ports`] - Interface traits for adapters, plus the pagination types
//! - [`validate`] - Request field validation
//! - [`error`] - Domain error types
//!
//! # Key Concepts
//!
//! ## Keyset pagination
//!
//! Every listing is a keyset scan: rows are ordered by a composite
//! `(sort key, id)` pair and resumed with an opaque [`ports::Cursor`]
//! built from the last row of the previous page. The engine fetches
//! `limit + 1` rows to detect a following page without a second query;
//! see [`ports::Page::assemble`].
//!
//! ## Ports
//!
//! Ports define interfaces that external adapters must implement:
//!
//! - [`ports::Repositories`] - Persist and query users/snippets/comments
//! - [`ports::TokenManager`] - Sign and verify the dual session tokens
//! - [`ports::PasswordHasher`] - Credential hashing

pub mod error;
pub mod models;
pub mod ports;
pub mod validate;
