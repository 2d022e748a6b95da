//! Error types for nmk
//!
//! Provides a unified error type used across all nmk crates.

use std::path::PathBuf;

/// Main error type for nmk operations
#[derive(Debug, thiserror::Error)]
pub enum NmkError {
    // === IO Errors ===

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Configuration Errors ===

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    #[error("Installation directory not found: {0}")]
    HomeNotFound(PathBuf),

    #[error("{0} environment variable is not set")]
    MissingVariable(String),

    // === Dependency Errors ===

    #[error("{name} not found in search path")]
    DependencyNotFound { name: String },

    #[error("Bad tmux version output: {0:?}")]
    BadVersionOutput(String),

    #[error("tmux {version} is not supported (no {path})")]
    UnsupportedVersion { version: String, path: PathBuf },

    // === Usage Errors ===

    #[error("Refusing to attach from inside tmux, add --inception to allow nested sessions")]
    NestedSession,

    // === Launch Errors ===

    #[error("Failed to exec {program}: {source}")]
    Exec {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to init logging: {0}")]
    Logging(String),

    // === Internal Errors ===

    #[error("Internal error: {0}")]
    Internal(String),
}

impl NmkError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a dependency-not-found error
    pub fn dependency(name: impl Into<String>) -> Self {
        Self::DependencyNotFound { name: name.into() }
    }

    /// Check if this error is something the user can fix by changing the invocation
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::NestedSession)
    }

    /// Process exit code used when this error terminates the launcher
    pub fn exit_code(&self) -> i32 {
        if self.is_usage_error() {
            2
        } else {
            1
        }
    }
}

/// Result type alias using NmkError
pub type Result<T> = std::result::Result<T, NmkError>;
