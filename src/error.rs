use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Could not read persisted upload list: {0}")]
    StorageRead(String),
    #[error("Could not persist upload list: {0}")]
    StorageWrite(String),
    #[error("Database Error: {0}")]
    DatabaseOperationFailed(String),
    #[error("Serialization Error: {0}")]
    Serialization(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO Error: {0}")]
    IOError(String),
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Backend responded with status {status}: {body}")]
    Api { status: u16, body: String },
}

impl Error {
    /// Storage failures never take the tracker down; callers may log and carry on.
    pub fn is_non_fatal(&self) -> bool {
        matches!(self, Self::StorageRead(_) | Self::StorageWrite(_))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        Self::DatabaseOperationFailed(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::IOError(value.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.to_string())
    }
}
