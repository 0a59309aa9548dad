//! HTTP client for a remote discovery registry.

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::registry::{ServiceDirectory, ServiceParams, ServiceSnapshot};

/// Errors that can occur when talking to a registry server
#[derive(Debug)]
pub enum ClientError {
    /// Server answered with a non-2xx status.
    Status { status: u16, url: String },
    /// Connection refused, DNS failure, reset, ...
    Network(String),
    /// Request exceeded the configured timeout.
    Timeout,
    /// Response body was not a valid snapshot.
    Decode(String),
    /// Id that can't be carried in a URL path segment (`""`, `"."`, `".."`).
    InvalidServiceId(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Status { status, url } => write!(f, "HTTP {} from {}", status, url),
            ClientError::Network(msg) => write!(f, "network error: {}", msg),
            ClientError::Timeout => write!(f, "request timed out"),
            ClientError::Decode(msg) => write!(f, "decode error: {}", msg),
            ClientError::InvalidServiceId(id) => {
                write!(f, "service id {:?} cannot be sent over HTTP", id)
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

/// Client for the registry's `/update` and `/get` endpoints.
///
/// Every call is exactly one request. Nothing is retried; failures are
/// returned to the caller as-is.
///
/// Ids are percent-encoded into the request path, so any id round-trips
/// except `""`, `"."` and `".."`: URL normalization drops or collapses those
/// segments (even when written as `%2e`), so they are rejected with
/// [`ClientError::InvalidServiceId`] before any request is sent. The
/// in-process [`ServiceRegistry`](crate::registry::ServiceRegistry) accepts them.
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    client: Client,
    base_url: String,
}

impl DiscoveryClient {
    /// Client for `http://{host}:{port}` with no request timeout.
    pub fn new(host: &str, port: u16) -> Result<Self, ClientError> {
        Self::build(host, port, None)
    }

    /// Client for `http://{host}:{port}` that gives up after `timeout`.
    pub fn with_timeout(host: &str, port: u16, timeout: Duration) -> Result<Self, ClientError> {
        Self::build(host, port, Some(timeout))
    }

    fn build(host: &str, port: u16, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder().user_agent("discovery-client");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: format!("http://{}:{}", host, port),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, action: &str, service_id: &str) -> Result<String, ClientError> {
        if matches!(service_id, "" | "." | "..") {
            return Err(ClientError::InvalidServiceId(service_id.to_string()));
        }
        Ok(format!(
            "{}/{}/{}",
            self.base_url,
            action,
            urlencoding::encode(service_id)
        ))
    }

    /// Replace the params of `service_id` on the server.
    pub async fn update_service(
        &self,
        service_id: &str,
        params: &ServiceParams,
    ) -> Result<(), ClientError> {
        let url = self.url("update", service_id)?;
        debug!(%url, "POST");

        let response = self.client.post(&url).json(params).send().await?;
        check_status(&response, &url)?;
        Ok(())
    }

    /// Fetch the current snapshot of `service_id`.
    ///
    /// The server never answers 404 here: an id that was never registered
    /// comes back as an empty snapshot.
    pub async fn get_service(&self, service_id: &str) -> Result<ServiceSnapshot, ClientError> {
        let url = self.url("get", service_id)?;
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        check_status(&response, &url)?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn check_status(response: &reqwest::Response, url: &str) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ClientError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl ServiceDirectory for DiscoveryClient {
    type Error = ClientError;

    async fn update_service(
        &self,
        service_id: &str,
        params: ServiceParams,
    ) -> Result<(), Self::Error> {
        DiscoveryClient::update_service(self, service_id, &params).await
    }

    async fn get_service(&self, service_id: &str) -> Result<ServiceSnapshot, Self::Error> {
        DiscoveryClient::get_service(self, service_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        let client = DiscoveryClient::new("localhost", 8000).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_url_encodes_service_id() {
        let client = DiscoveryClient::new("127.0.0.1", 9000).unwrap();
        assert_eq!(
            client.url("get", "team a/svc").unwrap(),
            "http://127.0.0.1:9000/get/team%20a%2Fsvc"
        );
        assert_eq!(
            client.url("update", "svc-a").unwrap(),
            "http://127.0.0.1:9000/update/svc-a"
        );
        assert_eq!(
            client.url("get", "a/../b").unwrap(),
            "http://127.0.0.1:9000/get/a%2F..%2Fb"
        );
    }

    #[test]
    fn test_url_rejects_dot_and_empty_ids() {
        let client = DiscoveryClient::new("127.0.0.1", 9000).unwrap();
        for id in ["", ".", ".."] {
            match client.url("get", id) {
                Err(ClientError::InvalidServiceId(rejected)) => assert_eq!(rejected, id),
                other => panic!("expected InvalidServiceId for {:?}, got {:?}", id, other),
            }
        }
        assert!(client.url("get", "...").is_ok());
        assert!(client.url("get", ".hidden").is_ok());
    }

    #[test]
    fn test_with_timeout_builds() {
        let client =
            DiscoveryClient::with_timeout("localhost", 8000, Duration::from_secs(2)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::Status {
            status: 503,
            url: "http://localhost:8000/get/a".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503 from http://localhost:8000/get/a");
        assert_eq!(ClientError::Timeout.to_string(), "request timed out");
        assert_eq!(
            ClientError::Network("refused".to_string()).to_string(),
            "network error: refused"
        );
        assert_eq!(
            ClientError::InvalidServiceId("..".to_string()).to_string(),
            "service id \"..\" cannot be sent over HTTP"
        );
    }
}
