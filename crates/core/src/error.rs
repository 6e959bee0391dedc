//! Error types for the QuickSnip domain layer.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`DomainError`] - Business logic errors
//! - [`StorageError`] - Database/repository errors
//! - [`AuthError`] - Token and credential errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Domain Errors
// =============================================================================

/// Business logic and domain rule violations.
///
/// These errors represent problems in the application's domain logic,
/// such as input validation failures or missing entities.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Input failed validation (bad limit, malformed cursor, field bounds).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested entity does not exist (or is not visible to the caller).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique-constraint conflict (e.g. duplicate snippet title).
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Authentication or ownership failure.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Database and repository errors.
///
/// These errors originate from storage operations like queries,
/// migrations, and row mapping.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to establish database connection.
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// SQL query execution failed.
    #[error("Query execution error: {0}")]
    QueryError(String),

    /// Requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Database constraint was violated (unique, foreign key, etc.).
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database migration failed.
    #[error("Migration error: {0}")]
    MigrationError(String),

    /// Data serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Token and credential verification errors.
///
/// Token failures are recoverable by re-authenticating; they are never
/// retried automatically beyond the single refresh-token fallback.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No token was supplied in the header or cookie.
    #[error("No token provided")]
    NoToken,

    /// Token signature is invalid or the payload is malformed.
    #[error("Invalid token")]
    InvalidToken,

    /// Token is past its expiry.
    #[error("Token expired")]
    TokenExpired,

    /// Email/password pair did not match a user.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Caller is authenticated but does not own the target resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unexpected failure in a signing or hashing primitive.
    #[error("Internal auth error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for token operations.
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    // Test critique: la chaîne de conversion d'erreurs fonctionne
    // Permet d'utiliser ? à travers les couches
    #[test]
    fn test_error_conversion_chain() {
        // Storage -> Domain
        let storage_err = StorageError::QueryError("db failed".into());
        let domain_err: DomainError = storage_err.into();
        assert!(domain_err.to_string().contains("db failed"));

        // Auth -> Domain
        let auth_err = AuthError::TokenExpired;
        let domain_err: DomainError = auth_err.into();
        assert!(domain_err.to_string().contains("expired"));
    }

    #[test]
    fn test_validation_message_preserved() {
        let err = DomainError::Validation("limit must be non-negative".into());
        assert!(err.to_string().contains("limit must be non-negative"));
    }
}
