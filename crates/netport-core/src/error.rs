//! Error types for the netport core.

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors that abort a discovery cycle.
///
/// Either kind leaves the known port set untouched.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to initialize discovery session: {0}")]
    Init(String),

    #[error("Failed to browse for {service_type}: {message}")]
    BrowseStart {
        service_type: String,
        message: String,
    },
}

/// Failure of a single reachability attempt.
///
/// Never surfaced to callers; the prober folds these into a boolean.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{address}:{port} did not answer within {timeout_ms} ms")]
    Timeout {
        address: String,
        port: u16,
        timeout_ms: u128,
    },

    #[error("Connection to {address}:{port} failed: {source}")]
    Connect {
        address: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request to {address}:{port} failed: {message}")]
    Http {
        address: String,
        port: u16,
        message: String,
    },

    #[error("{address}:{port} answered with HTTP {status}")]
    Status {
        address: String,
        port: u16,
        status: u16,
    },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_error_display() {
        let err = DiscoveryError::BrowseStart {
            service_type: "_arduino._tcp.local.".to_string(),
            message: "socket closed".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Failed to browse for _arduino._tcp.local.: socket closed"
        );
    }

    #[test]
    fn test_core_error_from_discovery_error() {
        let err: CoreError = DiscoveryError::Init("no interfaces".to_string()).into();
        assert!(matches!(err, CoreError::Discovery(DiscoveryError::Init(_))));
        assert!(format!("{}", err).contains("no interfaces"));
    }

    #[test]
    fn test_probe_status_display() {
        let err = ProbeError::Status {
            address: "10.0.0.5".to_string(),
            port: 80,
            status: 404,
        };
        assert_eq!(format!("{}", err), "10.0.0.5:80 answered with HTTP 404");
    }
}
