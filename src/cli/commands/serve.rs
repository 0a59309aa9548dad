use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::cli::ServeArgs;
use crate::config::Config;
use crate::native;
use crate::registry::ServiceRegistry;

pub async fn execute_serve(args: ServeArgs) -> Result<()> {
    let config = Config::resolve(args.config.as_deref())?.server;

    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);

    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;

    let registry = Arc::new(ServiceRegistry::new());
    native::serve(listener, registry, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolve once `signal` fires. If the handler can't be installed, keep
/// serving instead of shutting down straight after bind.
async fn wait_for_shutdown<F>(signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("received Ctrl-C, shutting down"),
        Err(e) => {
            warn!(error = %e, "failed to listen for Ctrl-C, serving until killed");
            std::future::pending::<()>().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_signal_resolves_shutdown() {
        let result =
            tokio::time::timeout(Duration::from_secs(1), wait_for_shutdown(async { Ok::<(), std::io::Error>(()) })).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_signal_error_keeps_serving() {
        let failing = async { Err(std::io::Error::other("no signal handler")) };
        let result = tokio::time::timeout(Duration::from_millis(200), wait_for_shutdown(failing)).await;
        assert!(result.is_err(), "shutdown must not resolve when the handler fails");
    }
}
