use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Error,
}

/// One entry of the persisted upload list.
///
/// Field names follow the stored JSON (`id`, `name`, `uploadDate`, `status`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileRecord {
    pub id: String,
    pub name: String,
    pub upload_date: String,
    pub status: UploadStatus,
}

impl UploadedFileRecord {
    /// Builds a record stamped with a fresh id and the current UTC time.
    pub fn new(name: impl Into<String>, status: UploadStatus) -> Self {
        Self::stamped(Uuid::now_v7().to_string(), name, status)
    }

    /// Like [`UploadedFileRecord::new`], keeping an id assigned elsewhere.
    pub fn stamped(id: impl Into<String>, name: impl Into<String>, status: UploadStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            upload_date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            status,
        }
    }

    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        upload_date: impl Into<String>,
        status: UploadStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            upload_date: upload_date.into(),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == UploadStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

/// What the backend hands back for a stored PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedPdf {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "filename", alias = "fileName")]
    pub name: String,
}
