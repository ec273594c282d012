//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Host configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server identity.
    pub server: ServerConfig,
    /// Succession policy toggles.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Metrics output.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name (e.g., "example.com"). Used as the suffix of event ids
    /// assigned locally in legacy room versions.
    pub name: String,
}

/// Succession policy configuration.
///
/// Read once when the policy is built and held for its lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PolicyConfig {
    /// Look for users with a raised level to promote before falling back to
    /// making everyone an admin.
    #[serde(default)]
    pub promote_moderators: bool,
    /// Domains whose users are never promoted in rooms with a `restricted`
    /// access rule.
    #[serde(default)]
    pub domains_forbidden_when_restricted: Vec<String>,
}

/// Metrics output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsConfig {
    /// Register Prometheus counters and print them on exit.
    #[serde(default)]
    pub enabled: bool,
}
