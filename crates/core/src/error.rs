//! Error types for the visualization core.
//!
//! Every fallible operation in the crate returns [`VizResult`]. Variants carry
//! enough context to produce a useful log line on their own.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors produced by scene setup, configuration, rendering and the task runtime.
#[derive(Debug)]
pub enum VizError {
    /// A viewport with a zero width or height was requested.
    InvalidViewport {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// A configuration value failed validation.
    InvalidConfig(String),

    /// Configuration file could not be parsed.
    Config(serde_json::Error),

    /// Reading or writing a file failed.
    Io {
        /// Path that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The render surface refused a frame.
    Render(String),

    /// A background task panicked or was aborted.
    TaskFailed(String),
}

impl VizError {
    /// Create error for a viewport with a zero dimension.
    pub fn invalid_viewport(width: u32, height: u32) -> Self {
        Self::InvalidViewport { width, height }
    }

    /// Create error for an invalid configuration parameter.
    ///
    /// # Arguments
    /// * `param_name` - The name of the offending field (e.g., `"fps"`, `"camera.near"`)
    /// * `message` - A description of the constraint that was violated
    pub fn invalid_config(param_name: &str, message: &str) -> Self {
        Self::InvalidConfig(format!("{param_name}: {message}"))
    }

    /// Wrap an I/O error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for VizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidViewport { width, height } => {
                write!(f, "invalid viewport {width}x{height}: dimensions must be non-zero")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Config(e) => write!(f, "failed to parse configuration: {e}"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Render(msg) => write!(f, "render failed: {msg}"),
            Self::TaskFailed(msg) => write!(f, "background task failed: {msg}"),
        }
    }
}

impl std::error::Error for VizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for VizError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e)
    }
}

impl From<tokio::task::JoinError> for VizError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::TaskFailed(e.to_string())
    }
}

/// Result alias used throughout the crate.
pub type VizResult<T> = Result<T, VizError>;
