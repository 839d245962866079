//! # Error Handling
//!
//! This module defines the centralized error type for the `repohome`
//! library. It uses `thiserror` to build an `Error` enum covering every
//! anticipated failure mode, each with a descriptive message.
//!
//! ## Key Components
//!
//! - **`Error`**: all failures the library can report. The variants map onto
//!   four user-facing categories:
//!   - parse errors (`UrlParse`): a remote URL in no recognized form. Fatal
//!     for a single clone item only.
//!   - index errors (`Index`): the index file could not be read, parsed or
//!     written. Fatal for the whole operation.
//!   - validation errors (`Validation`, `RootMissing`, `CloneTarget`): an
//!     operation target failed its precondition checks.
//!   - usage errors (`Usage`): unexpected interactive input.
//!
//! - **`Result<T>`**: a type alias for `std::result::Result<T, Error>`.
//!
//! Failures of external commands (`Command`) are reported through this type
//! as well, but batch callers treat them as non-fatal and keep going.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for repohome operations
#[derive(Error, Debug)]
pub enum Error {
    /// A remote URL did not match any supported form.
    #[error("Unrecognized repository URL: {url}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    UrlParse {
        url: String,
        /// Optional hint about the accepted forms
        hint: Option<String>,
    },

    /// The repository index could not be read, parsed or written.
    #[error("Repository index error at {}: {message}", path.display())]
    Index { path: PathBuf, message: String },

    /// A target path failed validation before a destructive operation.
    #[error("Cannot operate on {}: {reason}", path.display())]
    Validation { path: PathBuf, reason: String },

    /// The configured root directory does not exist.
    #[error("Root directory does not exist: {}", path.display())]
    RootMissing { path: PathBuf },

    /// A clone target exists but is not a repository.
    #[error("Clone target {} already exists and is not a git repository", path.display())]
    CloneTarget { path: PathBuf },

    /// Unexpected answer at an interactive prompt.
    #[error("Unexpected answer {input:?}: expected 'y' or 'n'")]
    Usage { input: String },

    /// An external command could not be spawned or exited unsuccessfully.
    #[error("Command failed: {command} - {message}")]
    Command { command: String, message: String },

    /// The editor project file could not be read or written.
    #[error("Project file error at {}: {message}", path.display())]
    Export { path: PathBuf, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Convenience constructor for index failures.
    pub fn index(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Error::Index {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Convenience constructor for validation failures.
    pub fn validation(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Validation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors that must stop a whole batch.
    ///
    /// Parse, clone-target and command failures only affect the item at hand.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Index { .. }
                | Error::Validation { .. }
                | Error::Usage { .. }
                | Error::RootMissing { .. }
        )
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
