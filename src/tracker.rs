use tracing::{debug, info, warn};

use crate::{
    data::{model::UploadedFileRecord, Storage},
    error::Error,
    Result,
};

pub const UPLOADED_FILES_KEY: &str = "uploadedFiles";

/// Keeps the list of files uploaded from this client and mirrors it into
/// durable storage after every change.
///
/// The in-memory list is authoritative once loaded. Storage failures are
/// logged and reported, never fatal.
pub struct UploadTracker<S: Storage> {
    storage: S,
    key: String,
    files: Vec<UploadedFileRecord>,
}

impl<S: Storage> UploadTracker<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, UPLOADED_FILES_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let files = match Self::load(&storage, &key) {
            Ok(files) => files,
            Err(e) => {
                warn!(key = %key, error = %e, "starting with an empty upload list");
                Vec::new()
            }
        };
        info!(key = %key, count = files.len(), "upload tracker initialized");

        Self {
            storage,
            key,
            files,
        }
    }

    fn load(storage: &S, key: &str) -> Result<Vec<UploadedFileRecord>> {
        let raw = match storage.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Vec::new()),
            Err(e) => return Err(Error::StorageRead(e.to_string())),
        };

        serde_json::from_str(&raw).map_err(|e| Error::StorageRead(e.to_string()))
    }

    /// Appends `record` unless a file with the same name is already tracked.
    ///
    /// Returns whether the record was inserted. The full list is written back
    /// to storage either way.
    pub fn add_uploaded_file(&mut self, record: UploadedFileRecord) -> Result<bool> {
        let inserted = if self.is_file_uploaded(&record.name) {
            debug!(name = %record.name, "file already tracked, keeping first entry");
            false
        } else {
            debug!(name = %record.name, id = %record.id, "tracking uploaded file");
            self.files.push(record);
            true
        };

        self.persist()?;
        Ok(inserted)
    }

    /// Forgets every tracked file and drops the storage entry.
    pub fn clear_uploaded_files(&mut self) -> Result<()> {
        self.files.clear();
        debug!(key = %self.key, "cleared upload list");

        if let Err(e) = self.storage.remove(&self.key) {
            warn!(key = %self.key, error = %e, "failed to remove persisted upload list");
            return Err(Error::StorageWrite(e.to_string()));
        }
        Ok(())
    }

    pub fn is_file_uploaded(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.name == name)
    }

    pub fn uploaded_files(&self) -> &[UploadedFileRecord] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) -> Result<()> {
        let snapshot = match serde_json::to_string(&self.files) {
            Ok(s) => s,
            Err(e) => return Err(Error::StorageWrite(e.to_string())),
        };

        if let Err(e) = self.storage.write(&self.key, &snapshot) {
            warn!(key = %self.key, error = %e, "failed to persist upload list");
            return Err(Error::StorageWrite(e.to_string()));
        }
        Ok(())
    }
}
