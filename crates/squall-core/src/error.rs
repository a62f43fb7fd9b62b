//! Error types for the Squall augmentation pipeline.
//!
//! Errors are split by blast radius: [`RunError`] halts a whole run before any
//! output is produced, while [`FileError`] is scoped to one source file (or one
//! effect output) and is recorded in the report instead of being propagated.

use std::path::PathBuf;
use thiserror::Error;

use crate::effects::EffectKind;

/// Top-level error type for Squall operations.
#[derive(Error, Debug)]
pub enum SquallError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fatal run conditions
    #[error("{0}")]
    Run(#[from] RunError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Conditions that abort a run before any file is touched.
#[derive(Error, Debug)]
pub enum RunError {
    /// The input directory is missing or is not a directory
    #[error("Input directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// The input directory holds no file with a supported extension
    #[error("No images found in {0}")]
    NoImagesFound(PathBuf),
}

/// Errors scoped to a single source file.
#[derive(Error, Debug)]
pub enum FileError {
    /// Image could not be read or decoded
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// One effect's output could not be persisted
    #[error("Failed to write {effect} output {path}: {message}")]
    Write {
        path: PathBuf,
        effect: EffectKind,
        message: String,
    },

    /// Processing exceeded the per-file budget
    #[error("Timed out processing {path} after {timeout_ms}ms")]
    Timeout { path: PathBuf, timeout_ms: u64 },

    /// The worker processing this file panicked or was aborted
    #[error("Worker failed on {path}: {message}")]
    Worker { path: PathBuf, message: String },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },
}

/// Convenience type alias for Squall results.
pub type Result<T> = std::result::Result<T, SquallError>;
