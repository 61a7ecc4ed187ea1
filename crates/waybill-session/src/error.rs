use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read session file {path}")]
    Read {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write session file {path}")]
    Write {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed session document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
