//! Authentication adapters for QuickSnip.
//!
//! This crate implements the `quicksnip-core` auth ports:
//!
//! - [`JwtTokenManager`] - dual HS256 token signer/verifier
//! - [`BcryptHasher`] - password hashing
//!
//! Both are injected into the API layer as trait objects; nothing in
//! this crate touches HTTP or the datastore.

mod password;
mod token;

pub use password::{BcryptHasher, BCRYPT_COST};
pub use token::{Claims, JwtTokenManager};
