//! Ports (interfaces) implemented by infrastructure adapters.

pub mod discharge_gateway;
pub mod patient_directory;
pub mod progress;

pub use discharge_gateway::{DischargeGateway, GatewayError};
pub use patient_directory::{DataStatus, DirectoryError, DirectoryReport, FileInfo, PatientDirectory};
pub use progress::{CaseProgress, NoProgress};
