//! Configuration loading and raw file types

pub mod file_config;
pub mod loader;

pub use file_config::{ApiConfig, AuthConfig, FileConfig, SessionConfig};
pub use loader::ConfigLoader;
