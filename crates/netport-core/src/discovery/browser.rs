//! Time-bounded service browser.
//!
//! The discovery collaborator pushes resolved announcements into a bounded
//! queue; the browser drains that queue until the discovery deadline, then
//! cancels the session.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::debug;

use super::markers::candidate_from;
use crate::config::default_markers;
use crate::error::DiscoveryError;
use crate::types::{Announcement, BoardMarker, Port};

/// Capacity of the announcement queue between producer and browser
pub const QUEUE_CAPACITY: usize = 64;

/// Opens discovery sessions.
pub trait ServiceResolver: Send + Sync {
    type Session: BrowseSession;

    /// Create a new session. Fails with [`DiscoveryError::Init`].
    fn open(&self) -> Result<Self::Session, DiscoveryError>;
}

/// A single discovery session.
pub trait BrowseSession: Send {
    /// Start browsing for `service_type`, delivering announcements into `queue`
    /// in arrival order. Fails with [`DiscoveryError::BrowseStart`].
    fn browse(
        &mut self,
        service_type: &str,
        queue: mpsc::Sender<Announcement>,
    ) -> Result<(), DiscoveryError>;

    /// Terminate the browse and release the session.
    fn cancel(self);
}

/// Anything that can produce candidate ports for one discovery cycle.
pub trait PortSource: Send + Sync {
    fn discover(
        &self,
        service_type: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<Vec<Port>, DiscoveryError>> + Send;
}

/// Collects announcements for a fixed window and normalizes them into ports.
pub struct ServiceBrowser<R> {
    resolver: R,
    markers: Vec<BoardMarker>,
}

impl<R: ServiceResolver> ServiceBrowser<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            markers: default_markers(),
        }
    }

    /// Replace the advertisement marker table.
    pub fn with_markers(mut self, markers: Vec<BoardMarker>) -> Self {
        self.markers = markers;
        self
    }

    fn push_candidate(&self, announcement: Announcement, candidates: &mut Vec<Port>) {
        match candidate_from(&announcement, &self.markers) {
            Some(port) => {
                debug!(
                    address = %port.address,
                    name = %port.display_name,
                    related = ?port.related_identifiers,
                    "Candidate port"
                );
                candidates.push(port);
            }
            None => {
                debug!(
                    instance = %announcement.instance,
                    "Announcement without IPv4 address skipped"
                );
            }
        }
    }
}

impl<R: ServiceResolver> PortSource for ServiceBrowser<R> {
    async fn discover(
        &self,
        service_type: &str,
        timeout: Duration,
    ) -> Result<Vec<Port>, DiscoveryError> {
        let mut session = self.resolver.open()?;

        let (tx, mut rx) = mpsc::channel(QUEUE_CAPACITY);
        if let Err(e) = session.browse(service_type, tx) {
            session.cancel();
            return Err(e);
        }

        let mut candidates = Vec::new();
        let deadline = sleep(timeout);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                biased;
                _ = &mut deadline => break,
                next = rx.recv() => match next {
                    Some(announcement) => self.push_candidate(announcement, &mut candidates),
                    // Producer finished before the deadline
                    None => break,
                },
            }
        }

        // Late producers see a closed queue; whatever was already buffered still counts.
        rx.close();
        while let Ok(announcement) = rx.try_recv() {
            self.push_candidate(announcement, &mut candidates);
        }

        session.cancel();

        debug!(
            service_type,
            count = candidates.len(),
            "Discovery window closed"
        );

        Ok(candidates)
    }
}
