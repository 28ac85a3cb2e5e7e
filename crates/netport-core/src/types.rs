//! Type definitions shared by the discovery engine and its front ends.

use serde::{Deserialize, Serialize};

/// A network-attached board discovered over mDNS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    /// Dotted IPv4 address, usable directly as a probe host
    pub address: String,
    /// Advertised service instance name
    pub display_name: String,
    /// Always true for ports produced by this engine
    pub is_network_port: bool,
    /// Platform identifiers inferred from the advertisement metadata
    pub related_identifiers: Vec<String>,
}

impl Port {
    pub fn new(address: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            display_name: display_name.into(),
            is_network_port: true,
            related_identifiers: Vec::new(),
        }
    }

    /// The (address, display name) pair that identifies a device.
    pub fn identity(&self) -> (&str, &str) {
        (&self.address, &self.display_name)
    }

    /// Whether `other` describes the same device as `self`.
    pub fn same_device(&self, other: &Port) -> bool {
        self.address == other.address && self.display_name == other.display_name
    }
}

/// A resolved service advertisement, as handed over by the discovery collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Announcement {
    /// Service instance name (without the service type suffix)
    pub instance: String,
    /// Every address the instance advertised
    pub addresses: Vec<std::net::IpAddr>,
    /// TXT record entries rendered as `key=value` (or a bare `key`)
    pub text: Vec<String>,
}

/// Maps a TXT marker substring to a canonical platform identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMarker {
    pub marker: String,
    pub identifier: String,
}

impl BoardMarker {
    pub fn new(marker: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            identifier: identifier.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_device_compares_both_fields() {
        let a = Port::new("10.0.0.5", "yun1");
        let b = Port::new("10.0.0.5", "yun1");
        let c = Port::new("10.0.0.5", "yun2");
        let d = Port::new("10.0.0.6", "yun1");

        assert!(a.same_device(&b));
        assert!(!a.same_device(&c));
        assert!(!a.same_device(&d));
    }

    #[test]
    fn test_same_device_ignores_related_identifiers() {
        let mut fresh = Port::new("10.0.0.5", "yun1");
        fresh.related_identifiers.push("arduino:avr:yun".to_string());
        let stale = Port::new("10.0.0.5", "yun1");

        assert!(fresh.same_device(&stale));
        assert_ne!(fresh, stale);
    }

    #[test]
    fn test_port_serializes_camel_case() {
        let mut port = Port::new("192.168.1.20", "yun-kitchen");
        port.related_identifiers.push("arduino:avr:yun".to_string());

        let json = serde_json::to_value(&port).unwrap();
        assert_eq!(json["address"], "192.168.1.20");
        assert_eq!(json["displayName"], "yun-kitchen");
        assert_eq!(json["isNetworkPort"], true);
        assert_eq!(json["relatedIdentifiers"][0], "arduino:avr:yun");
    }
}
