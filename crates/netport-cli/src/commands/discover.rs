//! Discover command implementation.

use netport_core::MdnsReconciler;

use crate::error::CliError;
use crate::output::get_formatter;

/// Run a single discovery cycle and print the result
pub async fn run_discover(engine: MdnsReconciler, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    if !json {
        eprintln!(
            "Browsing for {} for {} ms...",
            engine.settings().service_type,
            engine.settings().discovery_timeout.as_millis()
        );
    }

    let ports = engine.run_discovery_cycle().await?;
    println!("{}", formatter.format_ports(&ports));

    Ok(())
}
