//! Shared helpers for PostgreSQL error mapping.

use quicksnip_core::error::StorageError;

/// PostgreSQL SQLSTATE for unique-constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Map a sqlx error, surfacing unique-constraint violations as
/// [`StorageError::ConstraintViolation`] so callers can translate them
/// to a conflict response instead of a generic database error.
pub fn map_query_err(e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StorageError::ConstraintViolation(db_err.message().to_string());
        }
    }
    StorageError::QueryError(e.to_string())
}
