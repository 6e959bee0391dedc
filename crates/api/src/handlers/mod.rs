//! HTTP request handlers, grouped per route family.

pub mod comments;
pub mod snippets;
pub mod users;
