//! Watch command implementation.

use std::io::{self, Write};
use std::time::Duration;

use colored::*;
use netport_core::MdnsReconciler;
use tokio::time::{interval, MissedTickBehavior};

use crate::cli::WatchArgs;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run discovery cycles until Ctrl+C
pub async fn run_watch(args: WatchArgs, engine: MdnsReconciler, json: bool) -> Result<(), CliError> {
    if args.interval == 0 {
        return Err(CliError::InvalidArgument(
            "interval must be at least 1 second".to_string(),
        ));
    }

    let formatter = get_formatter(json);
    let mut ticker = interval(Duration::from_secs(args.interval));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    if !json {
        println!("Watching for boards (press Ctrl+C to stop)...\n");
    }

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {}
        }

        let outcome = tokio::select! {
            _ = &mut shutdown => break,
            outcome = engine.run_discovery_cycle() => outcome,
        };

        match outcome {
            Ok(ports) => {
                if !json {
                    // Clear screen and print header
                    print!("\x1B[2J\x1B[1;1H");
                    println!("{}", "netport watch".bold());
                    println!("{}", "Press Ctrl+C to stop".dimmed());
                    println!();
                }
                println!("{}", formatter.format_ports(&ports));
            }
            Err(e) => {
                // The previous list stays valid; the next tick retries
                eprintln!("{}", formatter.format_error(&e.to_string()));
            }
        }

        io::stdout().flush().ok();
    }

    Ok(())
}
