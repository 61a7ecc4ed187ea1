//! Error types for waybill-client.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

const GENERIC_SERVER_MESSAGE: &str = "Server is busy, please try again later";
const GENERIC_NETWORK_MESSAGE: &str = "Network request failed, please try again";
const SESSION_EXPIRED_MESSAGE: &str = "Login expired, please sign in again";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session expired")]
    SessionExpired,

    #[error("request rejected: {0}")]
    ClientRequest(String),

    #[error("server error")]
    Server,

    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("application error {code}: {msg}")]
    Application { code: i64, msg: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("login response carried no session")]
    MissingSession,

    #[error(transparent)]
    Sign(#[from] waybill_sign::SignError),

    #[error(transparent)]
    Storage(#[from] waybill_session::StorageError),
}

impl ApiError {
    /// The text to surface to the driver for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::SessionExpired => SESSION_EXPIRED_MESSAGE.to_string(),
            ApiError::ClientRequest(msg) | ApiError::Application { msg, .. } if !msg.is_empty() => {
                msg.clone()
            }
            ApiError::ClientRequest(_)
            | ApiError::Application { .. }
            | ApiError::Server
            | ApiError::UnexpectedStatus(_) => GENERIC_SERVER_MESSAGE.to_string(),
            ApiError::Network(_) | ApiError::Decode(_) => GENERIC_NETWORK_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    pub(crate) fn session_expired_message() -> &'static str { SESSION_EXPIRED_MESSAGE }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Failure of one step of the upload chain. No step is rolled back.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to obtain upload policy: {0}")]
    Config(#[source] ApiError),

    #[error("object store upload failed: {0}")]
    Transport(String),

    #[error("failed to resolve uploaded object URL: {0}")]
    Resolve(#[source] ApiError),

    #[error("failed to read {path}")]
    Io {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

impl UploadError {
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Config(e) | UploadError::Resolve(e) => e.user_message(),
            UploadError::Transport(_) => "Upload failed, please try again".to_string(),
            UploadError::Io { .. } => self.to_string(),
        }
    }
}
