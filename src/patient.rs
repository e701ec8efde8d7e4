use tracing::debug;

use crate::data::model::Patient;

/// The patient the dashboard is currently showing. Lives only in memory.
#[derive(Debug, Default, Clone)]
pub struct PatientSession {
    current: Option<Patient>,
}

impl PatientSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection, handing back the previously selected patient.
    pub fn set_patient(&mut self, patient: Patient) -> Option<Patient> {
        debug!(patient_id = %patient.id, "selected patient");
        self.current.replace(patient)
    }

    pub fn current(&self) -> Option<&Patient> {
        self.current.as_ref()
    }

    pub fn has_patient(&self) -> bool {
        self.current.is_some()
    }

    pub fn clear(&mut self) -> Option<Patient> {
        self.current.take()
    }
}
