//! # Validation Module
//!
//! Field validation for navigation entries.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Config parsing (serde / toml)                                │
//! │  └── Types and required keys                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - per-field rules                                │
//! │  ├── ids: lowercase slug                                               │
//! │  ├── paths: absolute, no whitespace, no query/fragment                 │
//! │  └── labels: non-empty, bounded                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: NavigationModel::new - cross-entry rules                     │
//! │  └── unique ids, unique paths                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest id accepted.
pub const MAX_ENTRY_ID_LEN: usize = 32;

/// Longest label (base or localized) accepted, in characters.
pub const MAX_LABEL_LEN: usize = 64;

/// Longest path accepted.
pub const MAX_PATH_LEN: usize = 256;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a navigation entry id.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
/// - Lowercase ASCII letters, digits and hyphens only
///
/// ## Example
/// ```rust
/// use aura_core::validation::validate_entry_id;
///
/// assert!(validate_entry_id("home").is_ok());
/// assert!(validate_entry_id("gift-cards").is_ok());
/// assert!(validate_entry_id("Home Page").is_err());
/// ```
pub fn validate_entry_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_ENTRY_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ENTRY_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must contain only lowercase letters, digits, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a route path.
///
/// ## Rules
/// - Must start with `/`
/// - No whitespace
/// - No query string or fragment (matching is exact on the path)
/// - No trailing slash except for the root path itself
///
/// ## Example
/// ```rust
/// use aura_core::validation::validate_path;
///
/// assert!(validate_path("/").is_ok());
/// assert!(validate_path("/product").is_ok());
/// assert!(validate_path("product").is_err());
/// assert!(validate_path("/product/").is_err());
/// ```
pub fn validate_path(path: &str) -> ValidationResult<()> {
    if path.is_empty() {
        return Err(ValidationError::Required {
            field: "path".to_string(),
        });
    }

    if path.len() > MAX_PATH_LEN {
        return Err(ValidationError::TooLong {
            field: "path".to_string(),
            max: MAX_PATH_LEN,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "path".to_string(),
        reason: reason.to_string(),
    };

    if !path.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }

    if path.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    if path.contains('?') || path.contains('#') {
        return Err(invalid("must not contain a query string or fragment"));
    }

    if path.len() > 1 && path.ends_with('/') {
        return Err(invalid("must not end with '/'"));
    }

    Ok(())
}

/// Validates a display label.
///
/// ## Rules
/// - Must not be blank
/// - At most 64 characters (counted as chars, labels are often non-Latin)
pub fn validate_label(field: &str, label: &str) -> ValidationResult<()> {
    if label.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if label.chars().count() > MAX_LABEL_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_LABEL_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_entry_id() {
        assert!(validate_entry_id("home").is_ok());
        assert!(validate_entry_id("about-2").is_ok());

        assert!(validate_entry_id("").is_err());
        assert!(validate_entry_id("  ").is_err());
        assert!(validate_entry_id("Shop").is_err());
        assert!(validate_entry_id("my shop").is_err());
        assert!(validate_entry_id(&"a".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("/").is_ok());
        assert!(validate_path("/categories").is_ok());
        assert!(validate_path("/account/orders").is_ok());

        assert!(validate_path("").is_err());
        assert!(validate_path("cart").is_err());
        assert!(validate_path("/my cart").is_err());
        assert!(validate_path("/cart?x=1").is_err());
        assert!(validate_path("/cart#top").is_err());
        assert!(validate_path("/cart/").is_err());
    }

    #[test]
    fn test_validate_label_counts_chars() {
        assert!(validate_label("label", "Home").is_ok());
        // Thai label: 8 chars, 24 bytes
        assert!(validate_label("localized_label", "หน้าหลัก").is_ok());
        assert!(validate_label("label", "   ").is_err());
        assert!(validate_label("label", &"ก".repeat(65)).is_err());
    }
}
