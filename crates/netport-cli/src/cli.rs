//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use netport_core::ProbeMethod;

/// netport - discover network-attached boards and keep the list current
#[derive(Parser, Debug)]
#[command(name = "netport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to config.json in the platform config directory)
    #[arg(long, global = true, env = "NETPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Discovery window in milliseconds
    #[arg(long, global = true, env = "NETPORT_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one discovery cycle and list reachable boards
    Discover(DiscoverArgs),

    /// Run discovery cycles on an interval
    Watch(WatchArgs),

    /// Check whether a single address answers the reachability probe
    Probe(ProbeArgs),
}

/// Overrides for values normally taken from the config file.
#[derive(Args, Debug, Default)]
pub struct EngineArgs {
    /// mDNS service type to browse for
    #[arg(long)]
    pub service_type: Option<String>,

    /// Probe method
    #[arg(long, value_enum)]
    pub probe_method: Option<ProbeMethodArg>,

    /// Primary probe port
    #[arg(long)]
    pub probe_port: Option<u16>,

    /// Alternate probe attempts with this port (e.g. 22)
    #[arg(long)]
    pub fallback_port: Option<u16>,

    /// Probe attempts per address
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Per-attempt probe timeout in milliseconds
    #[arg(long)]
    pub probe_timeout: Option<u64>,
}

// ==================== Discover ====================

#[derive(Args, Debug)]
pub struct DiscoverArgs {
    #[command(flatten)]
    pub engine: EngineArgs,
}

// ==================== Watch ====================

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between discovery cycles
    #[arg(short, long, default_value = "5")]
    pub interval: u64,

    #[command(flatten)]
    pub engine: EngineArgs,
}

// ==================== Probe ====================

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// IPv4 address to probe
    pub address: String,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ProbeMethodArg {
    Tcp,
    Http,
}

impl From<ProbeMethodArg> for ProbeMethod {
    fn from(arg: ProbeMethodArg) -> Self {
        match arg {
            ProbeMethodArg::Tcp => ProbeMethod::Tcp,
            ProbeMethodArg::Http => ProbeMethod::Http,
        }
    }
}
