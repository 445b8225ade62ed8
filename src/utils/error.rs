//! Error handling for quickwrap
//!
//! The transform itself never fails; these errors come from resolving the
//! input, loading config and writing the generated files.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Tool error
#[derive(Error, Debug)]
pub enum Error {
    // ==================== Input Resolution ====================

    #[error("Input path not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("File is not a header (.h): {}", path.display())]
    NotAHeader { path: PathBuf },

    #[error("Could not find header, expected: {}", path.display())]
    HeaderNotFound { path: PathBuf },

    #[error("Cannot derive a wrapper name from API name '{name}'")]
    InvalidApiName { name: String },

    // ==================== Config ====================

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    // ==================== File System ====================

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
