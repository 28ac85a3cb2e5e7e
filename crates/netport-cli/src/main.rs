//! netport - command-line front end for the network port discovery engine.
//!
//! Browses mDNS for boards, keeps the list of reachable boards current, and
//! prints it as a table or JSON.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use netport_core::MdnsReconciler;
use tracing_subscriber::{fmt, EnvFilter};

use cli::{Cli, Commands};
use commands::resolve_config;
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Logs go to stderr so JSON on stdout stays machine-readable.
fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Discover(args) => {
            let config = resolve_config(config_path, cli.timeout, &args.engine)?;
            let engine = MdnsReconciler::from_config(&config)?;
            commands::run_discover(engine, cli.json).await
        }
        Commands::Watch(args) => {
            let config = resolve_config(config_path, cli.timeout, &args.engine)?;
            let engine = MdnsReconciler::from_config(&config)?;
            commands::run_watch(args, engine, cli.json).await
        }
        Commands::Probe(args) => {
            let config = resolve_config(config_path, cli.timeout, &args.engine)?;
            commands::run_probe(args, &config, cli.json).await
        }
    }
}
