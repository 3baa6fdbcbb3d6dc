//! Error types for archive-exec
//!
//! Every failure is raised synchronously by the call that detects it. Variants
//! carry enough context (offending tool, file, captured output) for the calling
//! resource manager to surface them as user-facing failures.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for archive-exec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for archive-exec
#[derive(Debug, Error)]
pub enum Error {
    /// Extraction options have a shape that cannot be applied to the tool
    #[error("invalid options for command {tool}: {reason}")]
    InvalidOptions {
        /// Tool key the options were resolved for (empty for custom commands)
        tool: String,
        /// Why the options were rejected
        reason: String,
    },

    /// Digest name does not map to a known algorithm
    #[error("invalid checksum type {0}")]
    UnsupportedAlgorithm(String),

    /// No dispatch rule matches the archive's extension
    #[error("unknown filetype: {}", .0.display())]
    UnknownFiletype(PathBuf),

    /// Archive path cannot be written into a shell command line
    #[error("archive path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// No usable extraction tool could be located
    #[error("extraction tool not available: {0}")]
    ToolNotFound(String),

    /// The extraction command exited non-zero
    #[error("command failed with exit code {code:?}: {command}\n{output}")]
    ExecutionFailed {
        /// The command line that was run
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Combined stdout and stderr
        output: String,
    },

    /// Computed digest does not match the expected value
    #[error("checksum mismatch for {}: expected {expected}, got {actual}", path.display())]
    ChecksumMismatch {
        /// File that was hashed
        path: PathBuf,
        /// Expected digest (lowercase hex)
        expected: String,
        /// Computed digest (lowercase hex)
        actual: String,
    },

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "sevenzip_path")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build an [`Error::InvalidOptions`] for the given tool key
    pub(crate) fn invalid_options(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidOptions {
            tool: tool.into(),
            reason: reason.into(),
        }
    }
}
