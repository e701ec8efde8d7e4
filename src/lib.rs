use data::{sqlite_storage::SqliteStorage, Storage};
use patient::PatientSession;
use tracker::UploadTracker;

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod patient;
pub mod tracker;

pub type Result<T> = std::result::Result<T, error::Error>;

/// Client-side state built once at start-up and lent to every consumer.
pub struct AppContext<S: Storage> {
    tracker: UploadTracker<S>,
    patient: PatientSession,
}

impl<S: Storage> AppContext<S> {
    pub fn new(storage: S) -> Self {
        Self::with_tracker(UploadTracker::new(storage))
    }

    pub fn with_tracker(tracker: UploadTracker<S>) -> Self {
        Self {
            tracker,
            patient: PatientSession::new(),
        }
    }

    pub fn tracker(&self) -> &UploadTracker<S> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut UploadTracker<S> {
        &mut self.tracker
    }

    pub fn patient(&self) -> &PatientSession {
        &self.patient
    }

    pub fn patient_mut(&mut self) -> &mut PatientSession {
        &mut self.patient
    }
}

impl AppContext<SqliteStorage> {
    /// Opens the SQLite-backed store named in `config`.
    pub fn from_config(config: &config::Config) -> Result<Self> {
        let storage = SqliteStorage::open(&config.database_path)?;
        Ok(Self::with_tracker(UploadTracker::with_key(
            storage,
            config.storage_key.clone(),
        )))
    }
}
