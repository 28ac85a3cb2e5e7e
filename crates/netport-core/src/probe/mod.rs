//! Reachability probing.
//!
//! A board is reachable when any of a bounded number of connection attempts
//! succeeds. Individual failures are logged and folded into the boolean result.

pub mod http;
pub mod tcp;

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::config::{ProbeConfig, ProbeMethod, DEFAULT_PROBE_PORT};
use crate::error::{CoreError, ProbeError};

pub use http::check_http;
pub use tcp::check_tcp;

/// Decides whether a previously known address still answers.
pub trait Reachability: Send + Sync {
    /// Returns true as soon as one attempt succeeds, false once all
    /// `attempts` have failed. Never takes longer than
    /// `attempts * per_attempt_timeout`.
    fn is_reachable(
        &self,
        address: &str,
        attempts: u32,
        per_attempt_timeout: Duration,
    ) -> impl Future<Output = bool> + Send;
}

/// Network prober over TCP connect or HTTP HEAD.
#[derive(Debug, Clone)]
pub struct ReachabilityProber {
    method: ProbeMethod,
    port: u16,
    fallback_port: Option<u16>,
    client: Option<Client>,
}

impl Default for ReachabilityProber {
    fn default() -> Self {
        Self::tcp(DEFAULT_PROBE_PORT)
    }
}

impl ReachabilityProber {
    /// Probe with a plain TCP connect to `port`.
    pub fn tcp(port: u16) -> Self {
        Self {
            method: ProbeMethod::Tcp,
            port,
            fallback_port: None,
            client: None,
        }
    }

    /// Probe with `HEAD /` on `port`, accepting only status 200.
    pub fn http(port: u16) -> Result<Self, CoreError> {
        Ok(Self {
            method: ProbeMethod::Http,
            port,
            fallback_port: None,
            client: Some(http::build_client()?),
        })
    }

    pub fn from_config(config: &ProbeConfig) -> Result<Self, CoreError> {
        let prober = match config.method {
            ProbeMethod::Tcp => Self::tcp(config.port),
            ProbeMethod::Http => Self::http(config.port)?,
        };
        Ok(prober.with_fallback(config.fallback_port))
    }

    /// Alternate attempts between the primary and `fallback` port.
    pub fn with_fallback(mut self, fallback: Option<u16>) -> Self {
        self.fallback_port = fallback;
        self
    }

    pub fn method(&self) -> ProbeMethod {
        self.method
    }

    /// Port used for the zero-based `attempt`.
    pub fn port_for_attempt(&self, attempt: u32) -> u16 {
        match self.fallback_port {
            Some(fallback) if attempt % 2 == 1 => fallback,
            _ => self.port,
        }
    }

    async fn attempt(&self, address: &str, port: u16, limit: Duration) -> Result<(), ProbeError> {
        match (&self.method, &self.client) {
            (ProbeMethod::Http, Some(client)) => check_http(client, address, port, limit).await,
            _ => check_tcp(address, port, limit).await,
        }
    }
}

impl Reachability for ReachabilityProber {
    async fn is_reachable(&self, address: &str, attempts: u32, per_attempt_timeout: Duration) -> bool {
        for attempt in 0..attempts {
            let port = self.port_for_attempt(attempt);
            match self.attempt(address, port, per_attempt_timeout).await {
                Ok(()) => {
                    debug!(address, port, attempt = attempt + 1, "Probe succeeded");
                    return true;
                }
                Err(e) => {
                    debug!(address, port, attempt = attempt + 1, error = %e, "Probe attempt failed");
                }
            }
        }

        debug!(address, attempts, "Address unreachable");
        false
    }
}
