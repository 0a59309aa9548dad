//! Per-service record with creation/update bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ServiceParams;

/// Current state of one tracked service.
///
/// `age` and `elapsed` are never stored; they are derived from the two
/// timestamps every time the record is read.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceInfo {
    params: ServiceParams,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Caller-owned copy of a [`ServiceInfo`] taken at read time.
///
/// This is also the wire shape of `GET /get/{service_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSnapshot {
    pub params: ServiceParams,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Whole seconds since the record was created.
    pub age: i64,
    /// Whole seconds since the record was last updated.
    pub elapsed: i64,
}

impl ServiceInfo {
    /// New record with empty params, created and updated now.
    pub fn create() -> Self {
        Self::create_at(Utc::now())
    }

    pub(crate) fn create_at(now: DateTime<Utc>) -> Self {
        Self {
            params: ServiceParams::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace params wholesale and bump `updated_at`.
    pub fn update(&mut self, params: ServiceParams) {
        self.update_at(params, Utc::now());
    }

    pub(crate) fn update_at(&mut self, params: ServiceParams, now: DateTime<Utc>) {
        // updated_at >= created_at even if the wall clock stepped back
        self.updated_at = now.max(self.created_at);
        self.params = params;
    }

    pub fn params(&self) -> &ServiceParams {
        &self.params
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn age(&self) -> i64 {
        self.age_at(Utc::now())
    }

    pub fn elapsed(&self) -> i64 {
        self.elapsed_at(Utc::now())
    }

    /// Seconds between creation and `now`, truncated toward zero.
    pub fn age_at(&self, now: DateTime<Utc>) -> i64 {
        seconds_between(self.created_at, now)
    }

    /// Seconds between the last update and `now`, truncated toward zero.
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> i64 {
        seconds_between(self.updated_at, now)
    }

    pub fn snapshot(&self) -> ServiceSnapshot {
        self.snapshot_at(Utc::now())
    }

    /// Snapshot with derived fields computed against `now`.
    ///
    /// Params are cloned so the caller can't reach back into the registry.
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> ServiceSnapshot {
        ServiceSnapshot {
            params: self.params.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            age: self.age_at(now),
            elapsed: self.elapsed_at(now),
        }
    }
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds()
}
