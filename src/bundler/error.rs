//! Error types for packaging operations.

#![allow(dead_code)] // Public API - items may be used by external consumers

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while assembling a release package.
#[derive(Error, Debug)]
pub enum Error {
    /// Catch-all error with a formatted message (see [`bail!`](crate::bail)).
    #[error("{0}")]
    GenericError(String),

    /// IO errors without path context
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// IO errors annotated with the action and the path it failed on
    #[error("{action} failed for {}: {source}", .path.display())]
    Fs {
        /// What was being done when the error occurred
        action: String,
        /// Path the operation failed on
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// A required external tool is not on the command search path
    #[error("{tool} not found on PATH (is the Qt bin directory on the search path?)")]
    ToolNotFound {
        /// Name of the missing tool
        tool: String,
    },

    /// An external command could not be spawned
    #[error("failed to execute {command}: {error}")]
    CommandFailed {
        /// Command that failed to start
        command: String,
        /// Underlying spawn error
        error: std::io::Error,
    },

    /// Tool download errors
    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),

    /// Executable architecture detection errors
    #[error("architecture detection failed: {0}")]
    ArchError(String),

    /// Binary parsing errors from goblin
    #[error("binary parse error: {0}")]
    Object(#[from] goblin::error::Error),

    /// Zip archive errors
    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Invalid glob pattern for locating tool output
    #[error("glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Directory walk errors
    #[error("directory walk error: {0}")]
    Walkdir(#[from] walkdir::Error),

    /// Relative path computation errors
    #[error("path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),
}

/// Attach a plain-text context message to a failure.
///
/// Implemented for `Result` (wraps the underlying error message) and for
/// `Option` (turns `None` into an error).
pub trait Context<T> {
    /// Replace the error with `msg: <original error>`.
    fn context<C: Into<String>>(self, msg: C) -> Result<T>;

    /// Like [`Context::context`], with the message built lazily.
    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Into<String>>(self, msg: C) -> Result<T> {
        let msg: String = msg.into();
        self.map_err(|e| Error::GenericError(format!("{}: {}", msg, e)))
    }

    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let msg: String = f().into();
            Error::GenericError(format!("{}: {}", msg, e))
        })
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C: Into<String>>(self, msg: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.into()))
    }

    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().into()))
    }
}

/// Attach action and path context to IO failures.
pub trait ErrorExt<T> {
    /// Wrap an IO error into [`Error::Fs`] with the given action and path.
    fn fs_context(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            action: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Return early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::error::Error::GenericError(format!($($arg)*)))
    };
}
