//! ServiceDirectory trait and the in-process implementation.

use super::info::ServiceSnapshot;
use super::store::ServiceRegistry;
use super::ServiceParams;

/// Something that can record and report service state.
///
/// Implemented by [`ServiceRegistry`] for in-process use and by
/// [`DiscoveryClient`](crate::client::DiscoveryClient) for a remote registry,
/// so callers can be written once against either. The one difference: the
/// HTTP client rejects the ids `""`, `"."` and `".."`, which can't be carried
/// in a URL path.
#[async_trait::async_trait]
pub trait ServiceDirectory: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Replace the params reported by `service_id`.
    async fn update_service(
        &self,
        service_id: &str,
        params: ServiceParams,
    ) -> Result<(), Self::Error>;

    /// Current state of `service_id`; unknown ids yield an empty snapshot.
    async fn get_service(&self, service_id: &str) -> Result<ServiceSnapshot, Self::Error>;
}

#[async_trait::async_trait]
impl ServiceDirectory for ServiceRegistry {
    type Error = std::convert::Infallible;

    async fn update_service(
        &self,
        service_id: &str,
        params: ServiceParams,
    ) -> Result<(), Self::Error> {
        self.set(service_id, params);
        Ok(())
    }

    async fn get_service(&self, service_id: &str) -> Result<ServiceSnapshot, Self::Error> {
        Ok(self.get(service_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn register_version<D: ServiceDirectory>(
        directory: &D,
        id: &str,
        version: &str,
    ) -> Result<ServiceSnapshot, D::Error> {
        let params = json!({ "version": version }).as_object().cloned().unwrap();
        directory.update_service(id, params).await?;
        directory.get_service(id).await
    }

    #[tokio::test]
    async fn test_registry_as_directory() {
        let registry = ServiceRegistry::new();
        let snapshot = register_version(&registry, "svc-a", "1.2").await.unwrap();
        assert_eq!(snapshot.params["version"], json!("1.2"));
        assert!(snapshot.elapsed <= 1);
    }

    #[tokio::test]
    async fn test_registry_directory_unknown_id() {
        let registry = ServiceRegistry::new();
        let snapshot = registry.get_service("ghost").await.unwrap();
        assert!(snapshot.params.is_empty());
    }
}
