//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use netport_core::Port;

use super::OutputFormatter;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_ports(&self, ports: &[Port]) -> String {
        if ports.is_empty() {
            return "No boards found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Address", "Name", "Board"]);

        for port in ports {
            let board = if port.related_identifiers.is_empty() {
                Cell::new("-").fg(Color::DarkGrey)
            } else {
                Cell::new(port.related_identifiers.join(", ")).fg(Color::Cyan)
            };

            table.add_row(vec![
                Cell::new(&port.address),
                Cell::new(&port.display_name),
                board,
            ]);
        }

        format!("{}\n\nFound {} board(s)", table, ports.len())
    }

    fn format_probe_result(&self, address: &str, method: &str, reachable: bool) -> String {
        let status = if reachable {
            "[OK]".green()
        } else {
            "[FAIL]".red()
        };
        let verdict = if reachable { "reachable" } else { "unreachable" };

        format!("{} {} is {} ({})", status, address, verdict, method)
    }

    fn format_error(&self, error: &str) -> String {
        format!("{} {}", "Error:".red().bold(), error)
    }
}
