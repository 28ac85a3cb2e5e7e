//! mDNS-SD backed discovery sessions.

use std::net::IpAddr;
use std::time::Duration;

use mdns_sd::{ServiceDaemon, ServiceEvent, ServiceInfo};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::browser::{BrowseSession, ServiceResolver};
use crate::error::DiscoveryError;
use crate::types::Announcement;

/// How often the forwarding thread checks whether the browser stopped listening
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Append the `.local.` domain to a bare service type.
///
/// `_arduino._tcp` becomes `_arduino._tcp.local.`; qualified names pass through.
pub fn qualify_service_type(service_type: &str) -> String {
    let trimmed = service_type.trim_end_matches('.');
    if trimmed.ends_with(".local") {
        format!("{}.", trimmed)
    } else {
        format!("{}.local.", trimmed)
    }
}

/// Strip the service type suffix from a full instance name.
pub fn instance_name(fullname: &str, service_type: &str) -> String {
    fullname
        .strip_suffix(service_type)
        .map(|s| s.trim_end_matches('.'))
        .unwrap_or(fullname)
        .to_string()
}

fn announcement_from(info: &ServiceInfo) -> Announcement {
    let mut addresses: Vec<IpAddr> = info.get_addresses().iter().copied().collect();
    // HashSet order is arbitrary; IPv4 first, then numeric
    addresses.sort_by_key(|addr| (addr.is_ipv6(), *addr));

    let text = info
        .get_properties()
        .iter()
        .map(|prop| {
            let value = prop.val_str();
            if value.is_empty() {
                prop.key().to_string()
            } else {
                format!("{}={}", prop.key(), value)
            }
        })
        .collect();

    Announcement {
        instance: instance_name(info.get_fullname(), info.get_type()),
        addresses,
        text,
    }
}

/// Opens one mDNS daemon per discovery session.
#[derive(Debug, Default, Clone, Copy)]
pub struct MdnsResolver;

impl MdnsResolver {
    pub fn new() -> Self {
        Self
    }
}

impl ServiceResolver for MdnsResolver {
    type Session = MdnsSession;

    fn open(&self) -> Result<MdnsSession, DiscoveryError> {
        let daemon = ServiceDaemon::new().map_err(|e| DiscoveryError::Init(e.to_string()))?;
        Ok(MdnsSession {
            daemon,
            browsing: None,
        })
    }
}

pub struct MdnsSession {
    daemon: ServiceDaemon,
    browsing: Option<String>,
}

impl BrowseSession for MdnsSession {
    fn browse(
        &mut self,
        service_type: &str,
        queue: mpsc::Sender<Announcement>,
    ) -> Result<(), DiscoveryError> {
        let qualified = qualify_service_type(service_type);
        let receiver =
            self.daemon
                .browse(&qualified)
                .map_err(|e| DiscoveryError::BrowseStart {
                    service_type: qualified.clone(),
                    message: e.to_string(),
                })?;
        self.browsing = Some(qualified);

        // The daemon channel is blocking; forward it on a blocking thread until
        // either side goes away.
        tokio::task::spawn_blocking(move || loop {
            if queue.is_closed() {
                break;
            }
            match receiver.recv_timeout(POLL_INTERVAL) {
                Ok(ServiceEvent::ServiceResolved(info)) => {
                    let announcement = announcement_from(&info);
                    trace!(instance = %announcement.instance, "Service resolved");
                    if queue.blocking_send(announcement).is_err() {
                        break;
                    }
                }
                Ok(other) => trace!(event = ?other, "Ignoring mDNS event"),
                Err(_) if receiver.is_disconnected() => break,
                Err(_) => continue,
            }
        });

        Ok(())
    }

    fn cancel(self) {
        if let Some(service_type) = &self.browsing {
            if let Err(e) = self.daemon.stop_browse(service_type) {
                debug!(service_type = %service_type, error = %e, "Failed to stop browse");
            }
        }
        if let Err(e) = self.daemon.shutdown() {
            debug!(error = %e, "Failed to shut down mDNS daemon");
        }
    }
}
