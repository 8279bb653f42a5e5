//! Error types for ideprobe operations.
//!
//! Validation outcomes are never errors: a missing plugin or an unreadable
//! install root ends up inside a [`ValidationResult`](crate::validation::ValidationResult).
//! [`ProbeError`] covers the failures around that core, such as a broken
//! config file or a write to stdout that fails.
//!
//! # Error Handling Strategy
//!
//! - Use `ProbeError` for failures that need distinct handling
//! - Use `anyhow::Error` (via `ProbeError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ideprobe operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for ideprobe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
