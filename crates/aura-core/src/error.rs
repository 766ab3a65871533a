//! # Error Types
//!
//! Domain-specific error types for aura-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  aura-core errors (this file)                                          │
//! │  ├── CoreError        - NavigationModel invariant violations           │
//! │  └── ValidationError  - Malformed entry fields                         │
//! │                                                                         │
//! │  aura-shell errors (separate crate)                                    │
//! │  └── ShellError       - Config loading, channel failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ShellError → startup aborts       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## When Errors Happen
//! Only at startup. Every runtime derivation (counts, route matching,
//! composition) is a total function; a missing snapshot degrades to empty
//! instead of producing an error.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// NavigationModel construction errors.
///
/// These are fatal: the shell must not start with an inconsistent model,
/// because every surface would inherit the inconsistency.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Two entries share the same id.
    ///
    /// ## When This Occurs
    /// - A config file lists the same `id` twice
    /// - A hand-built catalog copies an entry without renaming it
    #[error("Duplicate navigation entry id: {0}")]
    DuplicateEntryId(String),

    /// Two entries share the same path.
    ///
    /// ## Why This Is Fatal
    /// ```text
    /// currentPath = "/shop"
    ///      │
    ///      ▼
    /// ┌────────────┐   ┌────────────┐
    /// │ shop  /shop│   │ sale  /shop│   ← both would be "active"
    /// └────────────┘   └────────────┘
    /// ```
    /// The route matcher relies on disjoint paths to return at most one id.
    #[error("Duplicate navigation path {path} (entries {first} and {second})")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    /// The model has no entries at all.
    #[error("Navigation model must contain at least one entry")]
    EmptyModel,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors for navigation entries.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. a path without a leading slash).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
