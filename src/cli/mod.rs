pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "discovery")]
#[command(about = "Track live services and their last reported parameters")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the registry server
    Serve(ServeArgs),
    /// Print the current snapshot of a service
    Get(GetArgs),
    /// Replace the parameters of a service
    Update(UpdateArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Address to bind (overrides [server].host)
    #[arg(long, env = "DISCOVERY_HOST")]
    pub host: Option<String>,

    /// Port to bind (overrides [server].port)
    #[arg(long, env = "DISCOVERY_PORT")]
    pub port: Option<u16>,

    /// Path to config file (defaults to ./.discovery.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Where a client command should send its request.
#[derive(clap::Args)]
pub struct ConnectArgs {
    /// Registry host (overrides [client].host)
    #[arg(long, env = "DISCOVERY_HOST")]
    pub host: Option<String>,

    /// Registry port (overrides [client].port)
    #[arg(long, env = "DISCOVERY_PORT")]
    pub port: Option<u16>,

    /// Request timeout in seconds (overrides [client].timeout_secs)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to config file (defaults to ./.discovery.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct GetArgs {
    /// Service identifier
    pub service_id: String,

    #[command(flatten)]
    pub connect: ConnectArgs,
}

#[derive(clap::Args)]
pub struct UpdateArgs {
    /// Service identifier
    pub service_id: String,

    /// Parameters as a JSON object, e.g. '{"version":"1.2"}'
    pub params: String,

    #[command(flatten)]
    pub connect: ConnectArgs,
}
