//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and carry their own defaults.

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend API settings
    pub api: ApiConfig,
    /// Local session settings
    pub session: SessionConfig,
    /// Sign-in settings
    pub auth: AuthConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

/// `[api]` section: where the discharge backend lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

/// `[session]` section: local session lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds of validity from issue; expired sessions require sign-in again.
    pub ttl_secs: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_secs: 1800 }
    }
}

/// `[auth]` section: demo credential check performed locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "caregiver".to_string(),
            password: "discharge2024".to_string(),
        }
    }
}

impl AuthConfig {
    /// Check a credential pair against the configured ones.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}
