use std::{fs, path::Path, path::PathBuf, time::Duration};

use serde::Deserialize;

use crate::{error::Error, tracker::UPLOADED_FILES_KEY, Result};

/// Host-level settings, read from a camelCase JSON document.
/// Every field is optional and falls back to [`Config::default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub storage_key: String,
    pub database_path: PathBuf,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub log_directory: PathBuf,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: UPLOADED_FILES_KEY.to_owned(),
            database_path: PathBuf::from("data").join("uploads.sqlite"),
            api_base_url: "http://localhost:8000".to_owned(),
            request_timeout_secs: 30,
            log_directory: PathBuf::from("."),
            log_filter: "health_uploads=info".to_owned(),
        }
    }
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
