use std::{path::Path, time::Duration};

use reqwest::blocking::{multipart::Form, Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{
    config::Config,
    data::{
        model::{UploadStatus, UploadedFileRecord, UploadedPdf},
        Storage,
    },
    error::Error,
    tracker::UploadTracker,
    Result,
};

/// Blocking client for the health-report backend.
pub struct HealthApiClient {
    client: Client,
    base_url: String,
}

impl HealthApiClient {
    const UPLOAD_PDF_PATH: &'static str = "upload-pdf";
    const PDFS_PATH: &'static str = "pdfs";
    const ANALYZE_PDFS_PATH: &'static str = "analyze-pdfs";
    const ANALYSIS_PATH: &'static str = "analysis";
    const HEALTH_DATA_PATH: &'static str = "health-data";
    const UPLOAD_FIELD_N: &'static str = "file";

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment.trim_matches('/'));
        }
        url
    }

    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            body,
        })
    }

    fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
        Ok(Self::check(response)?.json::<T>()?)
    }

    pub fn upload_pdf(&self, path: &Path) -> Result<UploadedPdf> {
        let form = Form::new().file(Self::UPLOAD_FIELD_N, path)?;
        debug!(path = %path.display(), "uploading pdf");

        let response = self
            .client
            .post(self.url(&[Self::UPLOAD_PDF_PATH]))
            .multipart(form)
            .send()?;
        Self::json(response)
    }

    pub fn list_pdfs(&self) -> Result<Vec<UploadedPdf>> {
        let response = self.client.get(self.url(&[Self::PDFS_PATH])).send()?;
        Self::json(response)
    }

    pub fn delete_pdf(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&[Self::PDFS_PATH, id]))
            .send()?;
        Self::check(response)?;
        Ok(())
    }

    pub fn delete_all_pdfs(&self) -> Result<()> {
        let response = self.client.delete(self.url(&[Self::PDFS_PATH])).send()?;
        Self::check(response)?;
        Ok(())
    }

    /// Asks the backend for a derived report over the given PDFs.
    pub fn analyze_pdfs(&self, pdf_ids: &[String], category: &str) -> Result<Value> {
        let payload = json!({
            "pdfIds": pdf_ids,
            "type": category,
        });

        let response = self
            .client
            .post(self.url(&[Self::ANALYZE_PDFS_PATH]))
            .json(&payload)
            .send()?;
        Self::json(response)
    }

    pub fn get_analysis(&self, id: &str, category: &str) -> Result<Value> {
        let response = self
            .client
            .get(self.url(&[Self::ANALYSIS_PATH, id, category]))
            .send()?;
        Self::json(response)
    }

    pub fn list_health_data(&self) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(self.url(&[Self::HEALTH_DATA_PATH]))
            .send()?;
        Self::json(response)
    }

    pub fn create_health_data(&self, data: &Value) -> Result<Value> {
        let response = self
            .client
            .post(self.url(&[Self::HEALTH_DATA_PATH]))
            .json(data)
            .send()?;
        Self::json(response)
    }

    pub fn update_health_data(&self, id: &str, data: &Value) -> Result<Value> {
        let response = self
            .client
            .put(self.url(&[Self::HEALTH_DATA_PATH, id]))
            .json(data)
            .send()?;
        Self::json(response)
    }

    pub fn delete_health_data(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&[Self::HEALTH_DATA_PATH, id]))
            .send()?;
        Self::check(response)?;
        Ok(())
    }

    /// Uploads `path` and records the outcome in `tracker`.
    ///
    /// The record is always keyed by the local file name; on success it keeps
    /// the backend id. A failed upload is still tracked, with `status = error`,
    /// and the upload error is returned. Failing to persist the tracker is
    /// only logged.
    pub fn upload_and_track<S: Storage>(
        &self,
        tracker: &mut UploadTracker<S>,
        path: &Path,
    ) -> Result<UploadedFileRecord> {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let (record, outcome) = match self.upload_pdf(path) {
            Ok(pdf) => {
                if pdf.name != name {
                    debug!(name = %name, stored_as = %pdf.name, "backend renamed upload");
                }
                (
                    UploadedFileRecord::stamped(pdf.id, name, UploadStatus::Success),
                    Ok(()),
                )
            }
            Err(e) => {
                warn!(name = %name, error = %e, "pdf upload failed");
                (UploadedFileRecord::new(name, UploadStatus::Error), Err(e))
            }
        };

        match tracker.add_uploaded_file(record.clone()) {
            Ok(inserted) => debug!(
                name = %record.name,
                success = record.is_success(),
                inserted,
                "tracked upload outcome"
            ),
            Err(e) => warn!(name = %record.name, error = %e, "upload tracked in memory only"),
        }

        outcome.map(|_| record)
    }
}
