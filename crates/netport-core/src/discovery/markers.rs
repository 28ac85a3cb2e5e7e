//! Announcement normalization.
//!
//! Turns a resolved advertisement into a candidate [`Port`], inferring board
//! identifiers from the TXT record.

use std::net::IpAddr;

use crate::types::{Announcement, BoardMarker, Port};

/// Translate TXT entries into platform identifiers.
///
/// Every entry is checked against every marker; an identifier is recorded once.
pub fn related_identifiers(text: &[String], markers: &[BoardMarker]) -> Vec<String> {
    let mut identifiers: Vec<String> = Vec::new();

    for entry in text {
        for marker in markers {
            if entry.contains(&marker.marker) && !identifiers.contains(&marker.identifier) {
                identifiers.push(marker.identifier.clone());
            }
        }
    }

    identifiers
}

/// Build a candidate port from an announcement.
///
/// Returns `None` when the instance advertised no IPv4 address.
pub fn candidate_from(announcement: &Announcement, markers: &[BoardMarker]) -> Option<Port> {
    let address = announcement.addresses.iter().find_map(|addr| match addr {
        IpAddr::V4(v4) => Some(v4.to_string()),
        IpAddr::V6(_) => None,
    })?;

    let mut port = Port::new(address, announcement.instance.clone());
    port.related_identifiers = related_identifiers(&announcement.text, markers);
    Some(port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_markers;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn announcement(instance: &str, addresses: Vec<IpAddr>, text: &[&str]) -> Announcement {
        Announcement {
            instance: instance.to_string(),
            addresses,
            text: text.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_yun_marker_translated() {
        let a = announcement(
            "yun1",
            vec![IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5))],
            &["ssh_upload=yes", "board=yun", "auth_upload=yes"],
        );

        let port = candidate_from(&a, &default_markers()).unwrap();
        assert_eq!(port.address, "10.0.0.5");
        assert_eq!(port.display_name, "yun1");
        assert!(port.is_network_port);
        assert_eq!(port.related_identifiers, vec!["arduino:avr:yun"]);
    }

    #[test]
    fn test_unknown_board_leaves_identifiers_empty() {
        let a = announcement(
            "uno-wifi",
            vec![IpAddr::V4(Ipv4Addr::new(192, 168, 1, 9))],
            &["board=unowifi"],
        );

        let port = candidate_from(&a, &default_markers()).unwrap();
        assert!(port.related_identifiers.is_empty());
    }

    #[test]
    fn test_prefers_ipv4_address() {
        let a = announcement(
            "yun1",
            vec![
                IpAddr::V6(Ipv6Addr::LOCALHOST),
                IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)),
            ],
            &[],
        );

        let port = candidate_from(&a, &default_markers()).unwrap();
        assert_eq!(port.address, "10.0.0.7");
    }

    #[test]
    fn test_ipv6_only_announcement_skipped() {
        let a = announcement("yun1", vec![IpAddr::V6(Ipv6Addr::LOCALHOST)], &["board=yun"]);
        assert!(candidate_from(&a, &default_markers()).is_none());
    }

    #[test]
    fn test_marker_recorded_once() {
        let markers = vec![
            BoardMarker::new("board=yun", "arduino:avr:yun"),
            BoardMarker::new("board=tian", "arduino:samd:tian"),
        ];
        let text = vec![
            "board=yun".to_string(),
            "vendor_board=yun".to_string(),
            "board=tian".to_string(),
        ];

        assert_eq!(
            related_identifiers(&text, &markers),
            vec!["arduino:avr:yun", "arduino:samd:tian"]
        );
    }
}
