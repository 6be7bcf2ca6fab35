//! Error types for Prism
//!
//! This module defines the error types used throughout the crate,
//! covering source loading, shader compilation, program linking and
//! driver resource allocation.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::driver::ShaderStage;

/// Result type for Prism operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism errors
#[derive(Debug, Clone)]
pub enum Error {
    /// A shader source file could not be read
    IoError {
        /// Path that was being read
        path: PathBuf,
        /// Kind reported by the operating system
        kind: io::ErrorKind,
        /// Human-readable message from the operating system
        message: String,
    },

    /// A shader stage failed to compile (driver info log attached)
    CompileError {
        /// Stage that failed
        stage: ShaderStage,
        /// Driver info log
        log: String,
    },

    /// The program failed to link (driver info log attached)
    LinkError(String),

    /// Backend-specific error (driver allocation failure, lost context, etc.)
    BackendError(String),

    /// Invalid resource (zero handle, foreign handle, etc.)
    InvalidResource(String),
}

impl Error {
    /// Build an `IoError` from a std I/O error and the path being read
    pub fn io(path: impl Into<PathBuf>, error: &io::Error) -> Self {
        Error::IoError {
            path: path.into(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IoError { path, message, .. } => {
                write!(f, "Failed to read shader source '{}': {}", path.display(), message)
            }
            Error::CompileError { stage, log } => {
                write!(f, "Shader compilation failed ({}): {}", stage.tag(), log)
            }
            Error::LinkError(log) => write!(f, "Program linking failed: {}", log),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
