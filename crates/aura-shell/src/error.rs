//! # Shell Error Types
//!
//! Error types for the navigation shell.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shell Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Model       │  │     Lifecycle           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Model(Core-    │  │  NotMounted             │ │
//! │  │  ConfigLoad/    │  │    Error)       │  │  ChannelError           │ │
//! │  │  SaveFailed     │  │                 │  │                         │ │
//! │  │  Io / Toml*     │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here happens at startup or on explicit lifecycle calls.
//! Runtime derivation never fails: a missing snapshot is an empty snapshot.

use aura_core::CoreError;
use thiserror::Error;

/// Result type alias for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;

/// Shell error type.
#[derive(Debug, Error)]
pub enum ShellError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid shell configuration.
    #[error("Invalid shell configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// Navigation model invariant violated (duplicate id/path, bad field).
    #[error("Invalid navigation model: {0}")]
    Model(#[from] CoreError),

    // =========================================================================
    // Lifecycle Errors
    // =========================================================================
    /// The shell was used after `unmount`.
    #[error("Navigation shell is not mounted")]
    NotMounted,

    /// Internal channel closed unexpectedly.
    #[error("Channel error: {0}")]
    ChannelError(String),

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialize error.
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ShellError {
    /// Returns true for errors that must abort startup.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ShellError::InvalidConfig(_)
                | ShellError::Model(_)
                | ShellError::TomlParse(_)
                | ShellError::ConfigLoadFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShellError::InvalidConfig("compact_threshold must be finite".into());
        assert_eq!(
            err.to_string(),
            "Invalid shell configuration: compact_threshold must be finite"
        );

        let err: ShellError = CoreError::DuplicateEntryId("home".into()).into();
        assert_eq!(
            err.to_string(),
            "Invalid navigation model: Duplicate navigation entry id: home"
        );
    }

    #[test]
    fn test_fatal_errors() {
        assert!(ShellError::Model(CoreError::EmptyModel).is_fatal());
        assert!(!ShellError::NotMounted.is_fatal());
        assert!(!ShellError::ChannelError("closed".into()).is_fatal());
    }
}
