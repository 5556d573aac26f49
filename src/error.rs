//! Error types for navsync operations.

use thiserror::Error;

/// Main error type for navsync operations.
#[derive(Error, Debug)]
pub enum NavSyncError {
    // Configuration errors
    #[error("GitHub Token is required")]
    TokenRequired,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Storage operation failed: {0}")]
    Storage(String),

    // Remote file errors
    #[error("failed to fetch file info: {0}")]
    FetchFailed(String),

    #[error("failed to save file: {0}")]
    SaveFailed(String),

    #[error("GitHub API responded with {status}: {message}")]
    RemoteError { status: u16, message: String },

    #[error("Network request failed: {0}")]
    NetworkError(String),

    // Navigation data errors
    #[error("link {url} already exists in category '{category}'")]
    DuplicateLink { category: String, url: String },

    #[error("link {url} not found in category '{category}'")]
    LinkNotFound { category: String, url: String },

    // Parsing errors
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Base64 decode error: {0}")]
    Base64DecodeError(#[from] base64::DecodeError),

    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),
}

/// Result type alias using NavSyncError
pub type Result<T> = std::result::Result<T, NavSyncError>;

impl NavSyncError {
    /// Create a storage error with context
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Message reported by the remote service, if this error carries one.
    pub fn remote_message(&self) -> String {
        match self {
            Self::RemoteError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for NavSyncError {
    /// Status errors are turned into `RemoteError` before reqwest sees them,
    /// so anything left here failed in transport or decoding.
    fn from(err: reqwest::Error) -> Self {
        Self::NetworkError(err.to_string())
    }
}
