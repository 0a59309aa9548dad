use bytes::Bytes;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::registry::{ServiceParams, ServiceRegistry, ServiceSnapshot};

/// Errors that can occur when handling a registry request
#[derive(Debug)]
pub enum HandleError {
    /// Update body was not a JSON object.
    Decode(String),
}

impl std::fmt::Display for HandleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandleError::Decode(e) => write!(f, "decode error: {}", e),
        }
    }
}

impl std::error::Error for HandleError {}

/// Decode an update payload into a parameter mapping.
///
/// Anything other than a JSON object is rejected.
pub fn decode_params(body: &[u8]) -> Result<ServiceParams, HandleError> {
    let value: JsonValue =
        serde_json::from_slice(body).map_err(|e| HandleError::Decode(e.to_string()))?;

    match value {
        JsonValue::Object(params) => Ok(params),
        other => Err(HandleError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Apply an update request. The registry is only touched if the body decodes.
pub fn handle_update(
    registry: &ServiceRegistry,
    service_id: &str,
    body: Bytes,
) -> Result<(), HandleError> {
    let params = decode_params(&body).map_err(|e| {
        warn!(service_id = %service_id, error = %e, "rejected update payload");
        e
    })?;

    debug!(service_id = %service_id, keys = params.len(), "updating service");
    registry.set(service_id, params);
    Ok(())
}

/// Answer a query request. Total: unknown ids yield an empty snapshot.
pub fn handle_get(registry: &ServiceRegistry, service_id: &str) -> ServiceSnapshot {
    registry.get(service_id)
}
