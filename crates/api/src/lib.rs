//! HTTP layer for QuickSnip.
//!
//! Exposes the REST surface over the domain ports: account/session
//! management with dual JWT cookies, snippet CRUD, keyset-paginated
//! feeds, and comments. All wiring is injected through [`AppState`],
//! so the router runs identically against PostgreSQL repositories or
//! in-memory fakes.

pub mod cookies;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod server;
pub mod state;

pub use cookies::CookiePolicy;
pub use error::{ApiError, ApiResult};
pub use server::{router, serve, ServerConfig};
pub use state::AppState;
