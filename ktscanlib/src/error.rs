//! Error types for ktscanlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or running a scan
#[derive(Error, Debug)]
pub enum ScanError {
    /// Listing the workspace, a project or a folder failed
    #[error("failed to access '{path}': {source}")]
    WorkspaceAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },
}

impl ScanError {
    /// Build a workspace access error for `path`.
    pub fn access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::WorkspaceAccess {
            path: path.into(),
            source,
        }
    }
}

impl From<walkdir::Error> for ScanError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        ScanError::WorkspaceAccess { path, source }
    }
}
