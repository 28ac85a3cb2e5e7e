//! JSON-formatted output for CLI.

use netport_core::Port;
use serde::Serialize;
use serde_json::json;

use super::OutputFormatter;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_ports(&self, ports: &[Port]) -> String {
        Self::to_json(&json!({
            "ports": ports,
            "count": ports.len()
        }))
    }

    fn format_probe_result(&self, address: &str, method: &str, reachable: bool) -> String {
        Self::to_json(&json!({
            "address": address,
            "method": method,
            "reachable": reachable
        }))
    }

    fn format_error(&self, error: &str) -> String {
        Self::to_json(&json!({ "error": error }))
    }
}
