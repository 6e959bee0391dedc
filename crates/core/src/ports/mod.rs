//! Interface traits (ports) implemented by infrastructure adapters.

mod pagination;
mod repository;
mod token;

pub use pagination::{
    Cursor, OrderDirection, Page, PageRequest, SeekFilter, DEFAULT_LIMIT, MAX_LIMIT,
};
pub use repository::{
    CommentRepository, Repositories, SnippetFilter, SnippetRepository, UserRepository,
};
pub use token::{PasswordHasher, TokenManager, ACCESS_TTL_SECS, REFRESH_TTL_SECS};
