//! Infrastructure layer for careroute
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod api;
pub mod config;

// Re-export commonly used types
pub use api::{ApiClient, ApiError, HttpDischargeGateway, HttpPatientDirectory};
pub use config::{ApiConfig, AuthConfig, ConfigLoader, FileConfig, SessionConfig};
