//! API transport errors and their mapping onto the port error types.

use careroute_application::ports::discharge_gateway::GatewayError;
use careroute_application::ports::patient_directory::DirectoryError;
use thiserror::Error;

/// Low-level HTTP/decoding errors shared by both adapters.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Response schema mismatch: {0}")]
    Schema(String),
}

impl ApiError {
    /// Classify a reqwest failure.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Schema(err.to_string())
        } else {
            ApiError::Connection(err.to_string())
        }
    }
}

impl From<ApiError> for GatewayError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Connection(message) => GatewayError::Connection(message),
            ApiError::Timeout => GatewayError::Timeout,
            ApiError::Status { status, message } => GatewayError::Status { status, message },
            ApiError::Schema(message) => GatewayError::Schema(message),
        }
    }
}

impl From<ApiError> for DirectoryError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Connection(message) => DirectoryError::Connection(message),
            ApiError::Timeout => DirectoryError::Connection("request timed out".to_string()),
            ApiError::Status { status, message } => DirectoryError::Status { status, message },
            ApiError::Schema(message) => DirectoryError::Schema(message),
        }
    }
}
