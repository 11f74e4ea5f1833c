//! Error types for envgate operations.
//!
//! This module defines [`EnvgateError`], the error type used by the
//! configuration-facing parts of the crate, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - Matching tags against a context is a total predicate and never errors
//! - Process identity resolution swallows every strategy failure
//! - Only manifest loading, tag parsing and mode parsing produce errors
//! - Use `anyhow::Error` (via `EnvgateError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for envgate operations.
#[derive(Debug, Error)]
pub enum EnvgateError {
    /// Manifest file not found at expected location.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Failed to parse the manifest file.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParseError { path: PathBuf, message: String },

    /// A tag declaration could not be parsed.
    #[error("Invalid tag '{spec}': {message}")]
    InvalidTag { spec: String, message: String },

    /// A mode name is not one of the known modes.
    #[error("Unknown mode '{value}' (expected one of: dev, sit, uat, prod)")]
    UnknownMode { value: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for envgate operations.
pub type Result<T> = std::result::Result<T, EnvgateError>;
