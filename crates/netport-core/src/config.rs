//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::BoardMarker;

/// Service type browsed for by default
pub const DEFAULT_SERVICE_TYPE: &str = "_arduino._tcp";

/// How long a discovery pass collects announcements
pub const DEFAULT_DISCOVERY_TIMEOUT_MS: u64 = 2000;

/// Primary probe port
pub const DEFAULT_PROBE_PORT: u16 = 80;

/// Secondary port used when the fallback is enabled
pub const SSH_PROBE_PORT: u16 = 22;

pub const DEFAULT_PROBE_ATTEMPTS: u32 = 3;

pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2000;

pub const DEFAULT_PROBE_CONCURRENCY: usize = 4;

/// How a reachability attempt is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMethod {
    /// Plain TCP connect
    #[default]
    Tcp,
    /// HTTP HEAD, success only on status 200
    Http,
}

impl ProbeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeMethod::Tcp => "tcp",
            ProbeMethod::Http => "http",
        }
    }
}

/// Reachability probe settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProbeConfig {
    pub method: ProbeMethod,
    pub port: u16,
    pub fallback_port: Option<u16>,
    pub attempts: u32,
    pub timeout_ms: u64,
    /// Maximum number of known ports probed at once
    pub concurrency: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            method: ProbeMethod::Tcp,
            port: DEFAULT_PROBE_PORT,
            fallback_port: None,
            attempts: DEFAULT_PROBE_ATTEMPTS,
            timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            concurrency: DEFAULT_PROBE_CONCURRENCY,
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub service_type: String,
    pub discovery_timeout_ms: u64,
    pub probe: ProbeConfig,
    pub markers: Vec<BoardMarker>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            service_type: DEFAULT_SERVICE_TYPE.to_string(),
            discovery_timeout_ms: DEFAULT_DISCOVERY_TIMEOUT_MS,
            probe: ProbeConfig::default(),
            markers: default_markers(),
        }
    }
}

/// Marker table shipped with the engine.
pub fn default_markers() -> Vec<BoardMarker> {
    vec![BoardMarker::new("board=yun", "arduino:avr:yun")]
}

impl EngineConfig {
    /// Load a config from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_type.trim().is_empty() {
            return Err(invalid("serviceType", "must not be empty"));
        }

        if self.discovery_timeout_ms == 0 {
            return Err(invalid("discoveryTimeoutMs", "must be greater than zero"));
        }

        if self.probe.timeout_ms == 0 {
            return Err(invalid("probe.timeoutMs", "must be greater than zero"));
        }

        if self.probe.concurrency == 0 {
            return Err(invalid("probe.concurrency", "must be greater than zero"));
        }

        if self.probe.port == 0 || self.probe.fallback_port == Some(0) {
            return Err(invalid("probe.port", "port 0 cannot be probed"));
        }

        if let Some(marker) = self
            .markers
            .iter()
            .find(|m| m.marker.is_empty() || m.identifier.is_empty())
        {
            return Err(invalid(
                "markers",
                &format!(
                    "entry '{}' -> '{}' has an empty field",
                    marker.marker, marker.identifier
                ),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.discovery_timeout(), Duration::from_secs(2));
        assert_eq!(config.probe.port, 80);
        assert_eq!(config.probe.attempts, 3);
        assert_eq!(config.markers[0].identifier, "arduino:avr:yun");
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"discoveryTimeoutMs": 500, "probe": {"method": "http", "fallbackPort": 22}}"#,
        )
        .unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.discovery_timeout_ms, 500);
        assert_eq!(config.probe.method, ProbeMethod::Http);
        assert_eq!(config.probe.fallback_port, Some(SSH_PROBE_PORT));
        // Untouched fields keep their defaults
        assert_eq!(config.probe.attempts, DEFAULT_PROBE_ATTEMPTS);
        assert_eq!(config.service_type, DEFAULT_SERVICE_TYPE);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = EngineConfig::load_or_default(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = EngineConfig::default();
        config.probe.concurrency = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "probe.concurrency"
        ));

        let mut config = EngineConfig::default();
        config.discovery_timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.service_type = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_marker() {
        let mut config = EngineConfig::default();
        config.markers.push(BoardMarker::new("", "arduino:avr:uno"));
        assert!(config.validate().is_err());
    }
}
