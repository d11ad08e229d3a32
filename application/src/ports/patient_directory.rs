//! Patient directory port
//!
//! Collaborator surface for the external data-management service: the
//! patient roster plus the file-loading endpoints. Consumed by the CLI but
//! outside the orchestration core's responsibility.

use async_trait::async_trait;
use careroute_domain::PatientData;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Server returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Response schema mismatch: {0}")]
    Schema(String),
}

/// One loadable source file on the data-management side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub modified: String,
    #[serde(default)]
    pub path: String,
}

/// `GET /data-status` reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStatus {
    pub total_patients: u64,
    pub data_directory: String,
    pub status: String,
    #[serde(default)]
    pub available_files: Vec<FileInfo>,
}

/// Reply from the mutation endpoints (`load-file`, `refresh-data`,
/// `set-data-directory`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryReport {
    pub message: String,
    #[serde(default)]
    pub patient_count: Option<u64>,
}

/// External patient directory and data-management service.
#[async_trait]
pub trait PatientDirectory: Send + Sync {
    async fn patients(&self) -> Result<Vec<PatientData>, DirectoryError>;

    async fn data_status(&self) -> Result<DataStatus, DirectoryError>;

    async fn available_files(&self) -> Result<Vec<FileInfo>, DirectoryError>;

    async fn load_file(&self, filename: &str) -> Result<DirectoryReport, DirectoryError>;

    async fn refresh_data(&self) -> Result<DirectoryReport, DirectoryError>;

    async fn set_data_directory(&self, directory_path: &str)
        -> Result<DirectoryReport, DirectoryError>;
}
