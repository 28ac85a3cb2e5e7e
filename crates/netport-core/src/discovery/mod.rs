//! mDNS service discovery.
//!
//! Provides announcement normalization, a time-bounded browser, and the
//! `mdns-sd` backed session used in production.

pub mod browser;
pub mod markers;
pub mod mdns;

pub use browser::{BrowseSession, PortSource, ServiceBrowser, ServiceResolver};
pub use markers::{candidate_from, related_identifiers};
pub use mdns::{qualify_service_type, MdnsResolver};
