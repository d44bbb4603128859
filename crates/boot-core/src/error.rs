//! Library error type

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving configuration or generating a project
#[derive(Debug, Error)]
pub enum BootError {
    /// A required answer was missing or invalid; generation never starts
    #[error("{0}")]
    Validation(String),

    /// Any read, write or mkdir failure
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Placeholder referencing an unknown field, malformed syntax, or non-UTF-8 template
    #[error("Failed to render template {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },

    /// The generated manifest.json is missing, not JSON, or has the wrong shape
    #[error("Invalid manifest {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },

    /// The template catalog is unreadable or does not list a required set
    #[error("Template catalog error: {0}")]
    Catalog(String),
}

impl BootError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        BootError::Validation(message.into())
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BootError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn render(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        BootError::Render {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn manifest(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        BootError::Manifest {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = BootError> = std::result::Result<T, E>;
