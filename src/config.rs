//! Service Configuration
//!
//! Defaults, overlaid by an optional YAML file (`LINGUISTIC_CONFIG`), overlaid
//! by `LINGUISTIC_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

pub const CONFIG_PATH_VAR: &str = "LINGUISTIC_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Reported as `service` by `GET /`
    pub service_name: String,
    /// Segments analysed in parallel within one batch
    pub concurrency: usize,
    /// tracing filter directive, used when `RUST_LOG` is unset
    pub log_filter: String,
    pub capabilities: CapabilityConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            service_name: "Linguistic Analysis Service".to_string(),
            concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            log_filter: "linguistic_service=info,tower_http=info".to_string(),
            capabilities: CapabilityConfig::default(),
        }
    }
}

/// Where to find the external capability servers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityConfig {
    pub tagger_url: Option<String>,
    pub readability_url: Option<String>,
    pub orality_url: Option<String>,
    pub features_url: Option<String>,
    pub timeout_secs: u64,
    /// Require a healthy `GET /health` before a capability counts as loaded
    pub probe: bool,
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            tagger_url: None,
            readability_url: None,
            orality_url: None,
            features_url: None,
            timeout_secs: 30,
            probe: true,
        }
    }
}

impl ServiceConfig {
    /// Loads `.env`, the optional YAML file, then environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_yaml_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Applies `LINGUISTIC_*` values returned by `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("LINGUISTIC_HOST") {
            self.host = v;
        }
        if let Some(v) = lookup("LINGUISTIC_PORT") {
            self.port = parse("LINGUISTIC_PORT", &v)?;
        }
        if let Some(v) = lookup("LINGUISTIC_SERVICE_NAME") {
            self.service_name = v;
        }
        if let Some(v) = lookup("LINGUISTIC_CONCURRENCY") {
            self.concurrency = parse("LINGUISTIC_CONCURRENCY", &v)?;
        }
        if let Some(v) = lookup("LINGUISTIC_LOG") {
            self.log_filter = v;
        }

        let caps = &mut self.capabilities;
        if let Some(v) = lookup("LINGUISTIC_TAGGER_URL") {
            caps.tagger_url = Some(v);
        }
        if let Some(v) = lookup("LINGUISTIC_READABILITY_URL") {
            caps.readability_url = Some(v);
        }
        if let Some(v) = lookup("LINGUISTIC_ORALITY_URL") {
            caps.orality_url = Some(v);
        }
        if let Some(v) = lookup("LINGUISTIC_FEATURES_URL") {
            caps.features_url = Some(v);
        }
        if let Some(v) = lookup("LINGUISTIC_CAPABILITY_TIMEOUT_SECS") {
            caps.timeout_secs = parse("LINGUISTIC_CAPABILITY_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("LINGUISTIC_PROBE_CAPABILITIES") {
            caps.probe = parse_bool("LINGUISTIC_PROBE_CAPABILITIES", &v)?;
        }

        self.concurrency = self.concurrency.max(1);
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
