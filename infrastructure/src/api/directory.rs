//! HTTP adapter for the patient directory port.

use super::client::ApiClient;
use async_trait::async_trait;
use careroute_application::ports::patient_directory::{
    DataStatus, DirectoryError, DirectoryReport, FileInfo, PatientDirectory,
};
use careroute_domain::PatientData;
use serde::Deserialize;
use tracing::instrument;

pub struct HttpPatientDirectory {
    client: ApiClient,
}

impl HttpPatientDirectory {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

// Wire envelopes the directory service wraps its lists in.
#[derive(Deserialize)]
struct PatientsReply {
    patients: Vec<PatientData>,
    #[serde(default)]
    #[allow(dead_code)]
    total: u64,
}

#[derive(Deserialize)]
struct FilesReply {
    #[serde(default)]
    #[allow(dead_code)]
    data_directory: String,
    files: Vec<FileInfo>,
}

#[async_trait]
impl PatientDirectory for HttpPatientDirectory {
    #[instrument(skip_all)]
    async fn patients(&self) -> Result<Vec<PatientData>, DirectoryError> {
        let reply: PatientsReply = self.client.get_json("patients").await?;
        Ok(reply.patients)
    }

    #[instrument(skip_all)]
    async fn data_status(&self) -> Result<DataStatus, DirectoryError> {
        Ok(self.client.get_json("data-status").await?)
    }

    #[instrument(skip_all)]
    async fn available_files(&self) -> Result<Vec<FileInfo>, DirectoryError> {
        let reply: FilesReply = self.client.get_json("available-files").await?;
        Ok(reply.files)
    }

    #[instrument(skip(self))]
    async fn load_file(&self, filename: &str) -> Result<DirectoryReport, DirectoryError> {
        let path = format!("load-file/{filename}");
        Ok(self.client.post_empty(&path).await?)
    }

    #[instrument(skip_all)]
    async fn refresh_data(&self) -> Result<DirectoryReport, DirectoryError> {
        Ok(self.client.post_empty("refresh-data").await?)
    }

    #[instrument(skip_all)]
    async fn set_data_directory(
        &self,
        directory_path: &str,
    ) -> Result<DirectoryReport, DirectoryError> {
        let body = serde_json::json!({ "directory_path": directory_path });
        Ok(self.client.post_json("set-data-directory", &body).await?)
    }
}
