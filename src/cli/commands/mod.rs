mod get;
mod serve;
mod update;

pub use get::execute_get;
pub use serve::execute_serve;
pub use update::execute_update;

use anyhow::Result;

use crate::cli::ConnectArgs;
use crate::client::DiscoveryClient;
use crate::config::Config;

/// Build a client from config, with CLI flags taking precedence.
fn connect(args: &ConnectArgs) -> Result<DiscoveryClient> {
    let config = Config::resolve(args.config.as_deref())?.client;

    let host = args.host.as_deref().unwrap_or(&config.host);
    let port = args.port.unwrap_or(config.port);
    let timeout = args
        .timeout
        .map(std::time::Duration::from_secs)
        .or_else(|| config.timeout());

    let client = match timeout {
        Some(timeout) => DiscoveryClient::with_timeout(host, port, timeout)?,
        None => DiscoveryClient::new(host, port)?,
    };
    Ok(client)
}
