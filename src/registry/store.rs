//! Shared in-memory store of service records.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::info::{ServiceInfo, ServiceSnapshot};
use super::{ServiceId, ServiceParams};

/// Registry of every service seen by this process.
///
/// Records are created lazily on first reference, from either [`set`] or
/// [`get`], and live for as long as the registry does. There is no eviction.
///
/// All access goes through a single lock, and get-or-create happens inside
/// it, so concurrent first references to an id always observe the same
/// record.
///
/// [`set`]: ServiceRegistry::set
/// [`get`]: ServiceRegistry::get
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    services: Mutex<HashMap<ServiceId, ServiceInfo>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the params of `id`, creating its record if needed.
    pub fn set(&self, id: &str, params: ServiceParams) {
        let mut services = self.lock();
        entry(&mut services, id).update(params);
    }

    /// Snapshot the record for `id`.
    ///
    /// An id that has never been seen is **not** an error: a fresh record
    /// with empty params is created and its snapshot returned. Callers rely
    /// on this to poll for services that haven't registered yet.
    pub fn get(&self, id: &str) -> ServiceSnapshot {
        let mut services = self.lock();
        entry(&mut services, id).snapshot()
    }

    /// Number of records materialized so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Every mutation leaves the map consistent, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<ServiceId, ServiceInfo>> {
        self.services.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn entry<'a>(
    services: &'a mut HashMap<ServiceId, ServiceInfo>,
    id: &str,
) -> &'a mut ServiceInfo {
    if !services.contains_key(id) {
        debug!(service_id = %id, "materializing service record");
    }
    services
        .entry(id.to_string())
        .or_insert_with(ServiceInfo::create)
}
