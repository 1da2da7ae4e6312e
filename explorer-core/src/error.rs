//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Explorer Core
//!
//! This module defines the error enum used across the crate. Each variant
//! carries enough context for diagnostics, and all fallible operations are
//! expected to return `Result<T, AppError>`.

use std::{io, path::PathBuf};
use thiserror::Error;

use crate::model::nav_history::HistoryDirection;

/// Unified error type for all explorer operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error retrieving file or directory metadata.
    #[error("Filesystem metadata error on {path:?}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permissions error while enumerating a folder.
    #[error("Permission denied: {0:?}")]
    PermissionDenied(PathBuf),

    /// Target folder does not exist (anymore).
    #[error("File or directory not found: {0:?}")]
    NotFound(PathBuf),

    /// Navigation history boundary reached.
    #[error("No {0} history available")]
    NoHistory(HistoryDirection),

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file I/O error with path.
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Enumeration superseded by a newer navigation.
    #[error("Operation was cancelled")]
    Cancelled,

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    /// Classify a folder-level enumeration failure by its IO kind.
    #[must_use]
    pub fn from_folder_io(path: &std::path::Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Metadata {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Attach extra context to an error.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, ctx: S) -> Self {
        Self::Other(format!("{}: {}", ctx.into(), self))
    }

    /// True when the underlying cause is a per-entry permission failure,
    /// which callers degrade to a best-effort listing instead of aborting.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::PermissionDenied(_) => true,
            Self::Metadata { source, .. } | Self::Io(source) => {
                source.kind() == io::ErrorKind::PermissionDenied
            }
            _ => false,
        }
    }
}

// Allow conversion from `anyhow::Error` as fallback.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self::Other(e.to_string())
    }
}
