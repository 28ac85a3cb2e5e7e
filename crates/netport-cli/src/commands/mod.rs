//! Command implementations.

pub mod discover;
pub mod probe;
pub mod watch;

pub use discover::run_discover;
pub use probe::run_probe;
pub use watch::run_watch;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use netport_core::EngineConfig;

use crate::cli::EngineArgs;
use crate::error::CliError;

/// Default config location, e.g. `~/.config/netport/config.json` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "netport").map(|dirs| dirs.config_dir().join("config.json"))
}

/// Load the config file (explicit or default) and apply command-line overrides.
pub fn resolve_config(
    path: Option<&Path>,
    timeout_ms: Option<u64>,
    args: &EngineArgs,
) -> Result<EngineConfig, CliError> {
    let mut config = match path {
        // An explicitly named file must exist
        Some(path) => EngineConfig::load(path)?,
        None => match default_config_path() {
            Some(path) => EngineConfig::load_or_default(&path)?,
            None => EngineConfig::default(),
        },
    };

    apply_overrides(&mut config, timeout_ms, args);
    config.validate()?;

    tracing::debug!(?config, "Resolved engine config");
    Ok(config)
}

fn apply_overrides(config: &mut EngineConfig, timeout_ms: Option<u64>, args: &EngineArgs) {
    if let Some(timeout) = timeout_ms {
        config.discovery_timeout_ms = timeout;
    }
    if let Some(service_type) = &args.service_type {
        config.service_type = service_type.clone();
    }
    if let Some(method) = args.probe_method {
        config.probe.method = method.into();
    }
    if let Some(port) = args.probe_port {
        config.probe.port = port;
    }
    if let Some(fallback) = args.fallback_port {
        config.probe.fallback_port = Some(fallback);
    }
    if let Some(attempts) = args.attempts {
        config.probe.attempts = attempts;
    }
    if let Some(timeout) = args.probe_timeout {
        config.probe.timeout_ms = timeout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ProbeMethodArg;
    use netport_core::ProbeMethod;

    #[test]
    fn test_overrides_replace_config_values() {
        let mut config = EngineConfig::default();
        let args = EngineArgs {
            service_type: Some("_http._tcp".to_string()),
            probe_method: Some(ProbeMethodArg::Http),
            fallback_port: Some(22),
            attempts: Some(1),
            ..EngineArgs::default()
        };

        apply_overrides(&mut config, Some(750), &args);

        assert_eq!(config.discovery_timeout_ms, 750);
        assert_eq!(config.service_type, "_http._tcp");
        assert_eq!(config.probe.method, ProbeMethod::Http);
        assert_eq!(config.probe.fallback_port, Some(22));
        assert_eq!(config.probe.attempts, 1);
        assert_eq!(config.probe.port, 80);
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let mut config = EngineConfig::default();
        apply_overrides(&mut config, None, &EngineArgs::default());
        assert_eq!(config, EngineConfig::default());
    }
}
