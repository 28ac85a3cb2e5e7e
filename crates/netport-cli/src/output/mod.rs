//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use netport_core::Port;

/// Output formatter trait
pub trait OutputFormatter {
    /// Format the port list produced by a discovery cycle
    fn format_ports(&self, ports: &[Port]) -> String;

    /// Format the outcome of a single reachability probe
    fn format_probe_result(&self, address: &str, method: &str, reachable: bool) -> String;

    /// Format an error
    fn format_error(&self, error: &str) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}
