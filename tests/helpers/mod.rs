#![allow(dead_code)] // Test helpers appear unused when compiled independently

use discovery::ServiceRegistry;
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const WAIT_ATTEMPTS: usize = 50;
const WAIT_DELAY: Duration = Duration::from_millis(100);

pub struct RegistryServer {
    pub port: u16,
    pub registry: Arc<ServiceRegistry>,
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl RegistryServer {
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }
}

/// Find an available TCP port
pub async fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Best-effort check for whether binding to loopback is permitted in the current sandbox.
pub async fn can_bind_loopback() -> bool {
    match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => {
            drop(listener);
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => false,
        Err(_) => true, // treat other errors as non-fatal for skipping
    }
}

/// Spawn a registry server on an ephemeral loopback port and wait until it is healthy.
pub async fn spawn_registry_server() -> RegistryServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind registry listener");
    let port = listener.local_addr().unwrap().port();

    let registry = Arc::new(ServiceRegistry::new());
    let server_registry = registry.clone();

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        let shutdown = async move {
            let _ = shutdown_rx.await;
        };
        if let Err(err) = discovery::native::serve(listener, server_registry, shutdown).await {
            eprintln!("registry server error: {}", err);
        }
    });

    let server = RegistryServer {
        port,
        registry,
        shutdown_tx,
        handle,
    };
    wait_for_health(&Client::new(), &server.base_url()).await;
    server
}

/// Wait for a server to respond to /health
pub async fn wait_for_health(client: &Client, base_url: &str) {
    poll_until(|| async {
        client
            .get(format!("{}/health", base_url))
            .send()
            .await
            .ok()
            .filter(|resp| resp.status().is_success())
            .map(|_| ())
    })
    .await
    .unwrap_or_else(|| panic!("timed out waiting for {} to be healthy", base_url));
}

async fn poll_until<T, F, Fut>(mut f: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    for _ in 0..WAIT_ATTEMPTS {
        if let Some(result) = f().await {
            return Some(result);
        }
        tokio::time::sleep(WAIT_DELAY).await;
    }
    None
}
