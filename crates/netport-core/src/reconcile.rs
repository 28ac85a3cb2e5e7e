//! Known port set reconciliation.
//!
//! Each cycle discovers candidates, drops known ports that were re-announced,
//! prunes the remaining known ports that no longer answer a probe, and appends
//! the fresh candidates. The known set is only ever replaced as a whole.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::discovery::{MdnsResolver, PortSource, ServiceBrowser};
use crate::error::Result;
use crate::probe::{Reachability, ReachabilityProber};
use crate::types::Port;

/// Parameters of a discovery cycle.
#[derive(Debug, Clone)]
pub struct CycleSettings {
    pub service_type: String,
    pub discovery_timeout: Duration,
    pub probe_attempts: u32,
    pub probe_timeout: Duration,
    pub probe_concurrency: usize,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for CycleSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            service_type: config.service_type.clone(),
            discovery_timeout: config.discovery_timeout(),
            probe_attempts: config.probe.attempts,
            probe_timeout: config.probe.timeout(),
            probe_concurrency: config.probe.concurrency,
        }
    }
}

/// Keep every known port that has no counterpart among the candidates.
pub fn retain_unsuperseded(known: &[Port], candidates: &[Port]) -> Vec<Port> {
    known
        .iter()
        .filter(|port| !candidates.iter().any(|c| c.same_device(port)))
        .cloned()
        .collect()
}

/// Owns the known port set and runs discovery cycles against it.
///
/// Cycles are serialized: a caller arriving while a cycle is in flight waits
/// for it to finish.
pub struct Reconciler<S, P> {
    source: S,
    prober: P,
    settings: CycleSettings,
    known: Mutex<Vec<Port>>,
}

/// Production engine: mDNS browser plus network prober.
pub type MdnsReconciler = Reconciler<ServiceBrowser<MdnsResolver>, ReachabilityProber>;

impl MdnsReconciler {
    /// Build the production engine from a validated config.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let browser = ServiceBrowser::new(MdnsResolver::new()).with_markers(config.markers.clone());
        let prober = ReachabilityProber::from_config(&config.probe)?;

        Ok(Reconciler::new(browser, prober, CycleSettings::from(config)))
    }
}

impl<S: PortSource, P: Reachability> Reconciler<S, P> {
    pub fn new(source: S, prober: P, settings: CycleSettings) -> Self {
        Self {
            source,
            prober,
            settings,
            known: Mutex::new(Vec::new()),
        }
    }

    pub fn settings(&self) -> &CycleSettings {
        &self.settings
    }

    /// Snapshot of the current known set.
    pub async fn known_ports(&self) -> Vec<Port> {
        self.known.lock().await.clone()
    }

    /// Run one discovery cycle and return the new known set.
    ///
    /// On discovery failure the known set is left exactly as it was.
    pub async fn run_discovery_cycle(&self) -> Result<Vec<Port>> {
        let mut known = self.known.lock().await;

        let candidates = match self
            .source
            .discover(&self.settings.service_type, self.settings.discovery_timeout)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "Discovery failed, keeping previous port list");
                return Err(e.into());
            }
        };

        let retained = retain_unsuperseded(&known, &candidates);
        let retained_count = retained.len();
        let mut ports = self.prune_unreachable(retained).await;
        let pruned_count = retained_count - ports.len();
        let fresh_count = candidates.len();

        ports.extend(candidates);

        info!(
            fresh = fresh_count,
            retained = retained_count,
            pruned = pruned_count,
            total = ports.len(),
            "Discovery cycle complete"
        );

        *known = ports.clone();
        Ok(ports)
    }

    /// Stable filter over `ports`, keeping those that answer a probe.
    async fn prune_unreachable(&self, ports: Vec<Port>) -> Vec<Port> {
        if ports.is_empty() {
            return ports;
        }

        let attempts = self.settings.probe_attempts;
        let timeout = self.settings.probe_timeout;

        // `buffered` yields in input order, so the survivors keep their order.
        stream::iter(ports)
            .map(|port| async move {
                let live = self
                    .prober
                    .is_reachable(&port.address, attempts, timeout)
                    .await;
                if !live {
                    info!(address = %port.address, name = %port.display_name, "Pruning unreachable port");
                }
                (port, live)
            })
            .buffered(self.settings.probe_concurrency.max(1))
            .filter_map(|(port, live)| async move { live.then_some(port) })
            .collect()
            .await
    }
}
