//! CLI configuration.
//!
//! Supports loading from YAML files with environment variable overrides.
//! Command-line flags are applied on top by `main`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use onvif_core::{ClientConfig, Credentials, DiscoveryConfig};
use serde::Deserialize;

/// CLI configuration loaded from YAML with environment overrides.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    /// Device address: host, host:port or a full service URL.
    /// Override: `ONVIF_ENDPOINT`
    pub endpoint: Option<String>,

    /// Override: `ONVIF_USERNAME`
    pub username: Option<String>,

    /// Override: `ONVIF_PASSWORD`
    pub password: Option<String>,

    /// Per-call SOAP timeout in seconds.
    pub timeout_secs: u64,

    /// Discovery collection window in seconds.
    pub discovery_timeout_secs: u64,

    /// Interface name or address to probe on.
    /// Override: `ONVIF_INTERFACE`
    pub interface: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        let client = ClientConfig::default();
        let discovery = DiscoveryConfig::default();
        Self {
            endpoint: None,
            username: None,
            password: None,
            timeout_secs: client.timeout.as_secs(),
            discovery_timeout_secs: discovery.timeout.as_secs(),
            interface: None,
        }
    }
}

impl CliConfig {
    /// Loads configuration from a YAML file, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies overrides from `lookup` (the process environment in
    /// production). Empty values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(val) = get("ONVIF_ENDPOINT") {
            self.endpoint = Some(val);
        }
        if let Some(val) = get("ONVIF_USERNAME") {
            self.username = Some(val);
        }
        if let Some(val) = get("ONVIF_PASSWORD") {
            self.password = Some(val);
        }
        if let Some(val) = get("ONVIF_INTERFACE") {
            self.interface = Some(val);
        }
        if let Some(secs) = get("ONVIF_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.timeout_secs = secs;
        }
    }

    /// Client settings; a missing username means anonymous calls.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            credentials: Credentials::new(
                self.username.clone().unwrap_or_default(),
                self.password.clone().unwrap_or_default(),
            ),
        }
    }

    pub fn discovery_config(&self) -> DiscoveryConfig {
        DiscoveryConfig {
            timeout: Duration::from_secs(self.discovery_timeout_secs),
            interface: self.interface.clone(),
        }
    }
}
