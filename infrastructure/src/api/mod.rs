//! HTTP adapters for the application-layer ports

pub mod client;
pub mod directory;
pub mod error;
pub mod gateway;

pub use client::ApiClient;
pub use directory::HttpPatientDirectory;
pub use error::ApiError;
pub use gateway::HttpDischargeGateway;
