//! Field validation for request payloads.
//!
//! Validation runs before any datastore call; failures surface as
//! [`DomainError::Validation`] and never reach a repository.

use crate::error::{DomainError, DomainResult};

/// Validate a username: 6 to 30 characters, letters and digits only.
pub fn username(value: &str) -> DomainResult<()> {
    if value.len() < 6 {
        return Err(DomainError::Validation(
            "Username must be at least 6 characters long".into(),
        ));
    }
    if value.len() > 30 {
        return Err(DomainError::Validation(
            "Username must be at most 30 characters long".into(),
        ));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::Validation(
            "Username can only contain letters and numbers".into(),
        ));
    }
    Ok(())
}

/// Validate an email address. A light structural check: one `@` with a
/// non-empty local part and a dotted domain.
pub fn email(value: &str) -> DomainResult<()> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DomainError::Validation("Invalid email address".into()))
    }
}

/// Validate a password for registration: 8 to 100 characters with at
/// least one uppercase letter, one lowercase letter, one digit, and one
/// special character.
pub fn password(value: &str) -> DomainResult<()> {
    if value.len() < 8 {
        return Err(DomainError::Validation(
            "Password must be at least 8 characters long".into(),
        ));
    }
    if value.len() > 100 {
        return Err(DomainError::Validation(
            "Password must be at most 100 characters long".into(),
        ));
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(DomainError::Validation(
            "Password must contain at least one uppercase letter".into(),
        ));
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(DomainError::Validation(
            "Password must contain at least one lowercase letter".into(),
        ));
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(DomainError::Validation(
            "Password must contain at least one number".into(),
        ));
    }
    if !value.chars().any(|c| !c.is_ascii_alphanumeric()) {
        return Err(DomainError::Validation(
            "Password must contain at least one special character".into(),
        ));
    }
    Ok(())
}

/// Validate a snippet title: required, at most 255 characters.
pub fn snippet_title(value: &str) -> DomainResult<()> {
    bounded("Title", value, 1, 255)
}

/// Validate snippet markdown content: required, at most 5000 characters.
pub fn snippet_markdown(value: &str) -> DomainResult<()> {
    bounded("Markdown content", value, 1, 5000)
}

/// Validate an optional snippet description: at most 1000 characters.
pub fn snippet_description(value: &str) -> DomainResult<()> {
    bounded("Description", value, 0, 1000)
}

/// Validate an optional tag list: at most 500 characters.
pub fn snippet_tags(value: &str) -> DomainResult<()> {
    bounded("Tags", value, 0, 500)
}

/// Validate a comment body: 1 to 300 characters.
pub fn comment(value: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::Validation(
            "minimum 1 character required".into(),
        ));
    }
    if value.chars().count() > 300 {
        return Err(DomainError::Validation(
            "maximum limit reached for comments".into(),
        ));
    }
    Ok(())
}

fn bounded(field: &str, value: &str, min: usize, max: usize) -> DomainResult<()> {
    let len = value.chars().count();
    if len < min {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    if len > max {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_bounds_and_charset() {
        assert!(username("ferris1").is_ok());
        assert!(username("abc").is_err()); // too short
        assert!(username(&"a".repeat(31)).is_err()); // too long
        assert!(username("ferris_1").is_err()); // underscore not allowed
    }

    #[test]
    fn email_structure() {
        assert!(email("user@example.com").is_ok());
        assert!(email("no-at-sign").is_err());
        assert!(email("@example.com").is_err());
        assert!(email("user@nodot").is_err());
        assert!(email("user@.com").is_err());
    }

    #[test]
    fn password_complexity() {
        assert!(password("Str0ng!pass").is_ok());
        assert!(password("short1!").is_err());
        assert!(password("alllowercase1!").is_err());
        assert!(password("ALLUPPERCASE1!").is_err());
        assert!(password("NoDigits!!").is_err());
        assert!(password("NoSpecial11").is_err());
    }

    #[test]
    fn comment_bounds() {
        assert!(comment("nice").is_ok());
        assert!(comment("").is_err());
        assert!(comment(&"x".repeat(301)).is_err());
    }

    #[test]
    fn snippet_field_bounds() {
        assert!(snippet_title("Hello").is_ok());
        assert!(snippet_title("").is_err());
        assert!(snippet_markdown(&"m".repeat(5001)).is_err());
        assert!(snippet_description("").is_ok()); // optional field, empty fine
        assert!(snippet_tags(&"t".repeat(501)).is_err());
    }
}
