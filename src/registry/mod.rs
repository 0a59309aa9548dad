//! In-memory service registry: records, the shared store, and the
//! directory abstraction over local and remote registries.

mod directory;
mod info;
mod store;

pub use directory::ServiceDirectory;
pub use info::{ServiceInfo, ServiceSnapshot};
pub use store::ServiceRegistry;

/// Opaque identifier of one service instance.
pub type ServiceId = String;

/// Free-form parameters a service reports about itself.
pub type ServiceParams = serde_json::Map<String, serde_json::Value>;
