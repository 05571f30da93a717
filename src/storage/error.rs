use std::io;
use std::path::PathBuf;

/// Failures while reading or writing slideshow files.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("slideshow '{0}' not found")]
    NotFound(String),

    #[error("invalid slideshow id '{0}' (use letters, digits, '-' or '_')")]
    InvalidId(String),

    #[error("{} is {size} bytes, over the limit of {limit} bytes", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed slideshow data in {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} uses file format version {found}, newest supported is {supported}", .path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },
}

impl StorageError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
