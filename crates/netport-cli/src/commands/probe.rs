//! Probe command implementation.

use std::net::Ipv4Addr;

use netport_core::{EngineConfig, Reachability, ReachabilityProber};

use crate::cli::ProbeArgs;
use crate::error::CliError;
use crate::output::get_formatter;

/// Probe a single address with the configured reachability check
pub async fn run_probe(args: ProbeArgs, config: &EngineConfig, json: bool) -> Result<(), CliError> {
    if args.address.parse::<Ipv4Addr>().is_err() {
        return Err(CliError::InvalidArgument(format!(
            "'{}' is not an IPv4 address",
            args.address
        )));
    }

    let formatter = get_formatter(json);
    let prober = ReachabilityProber::from_config(&config.probe)?;

    let reachable = prober
        .is_reachable(&args.address, config.probe.attempts, config.probe.timeout())
        .await;

    println!(
        "{}",
        formatter.format_probe_result(&args.address, config.probe.method.as_str(), reachable)
    );

    if reachable {
        Ok(())
    } else {
        Err(CliError::Unreachable(args.address))
    }
}
