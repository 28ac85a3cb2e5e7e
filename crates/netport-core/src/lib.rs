//! Discovery and liveness reconciliation for network-attached boards.
//!
//! Boards advertise themselves over mDNS. Each discovery cycle browses for a
//! fixed window, merges the fresh announcements into the previously known
//! set, and prunes known boards that no longer answer a reachability probe.
//!
//! ```no_run
//! use netport_core::{EngineConfig, MdnsReconciler};
//!
//! # async fn run() -> netport_core::Result<()> {
//! let engine = MdnsReconciler::from_config(&EngineConfig::default())?;
//! for port in engine.run_discovery_cycle().await? {
//!     println!("{} {}", port.address, port.display_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod probe;
pub mod reconcile;
pub mod types;

pub use config::{EngineConfig, ProbeConfig, ProbeMethod};
pub use discovery::{MdnsResolver, PortSource, ServiceBrowser};
pub use error::{ConfigError, CoreError, DiscoveryError, ProbeError, Result};
pub use probe::{Reachability, ReachabilityProber};
pub use reconcile::{CycleSettings, MdnsReconciler, Reconciler};
pub use types::{Announcement, BoardMarker, Port};
