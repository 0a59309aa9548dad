// src/lib.rs
//! In-memory service discovery registry with an HTTP interface and client.
//!
//! A [`ServiceRegistry`] maps service ids to their last reported params and
//! tracks when each was first seen and last updated. [`native::build_router`]
//! exposes it over HTTP and [`DiscoveryClient`] talks to that API.
//!
//! Note that `get` on an id nobody has registered returns an empty record
//! instead of failing; the record is created on the spot.

pub mod cli;
pub mod client;
pub mod config;
mod handler;
pub mod native;
pub mod registry;

pub use client::{ClientError, DiscoveryClient};
pub use handler::{decode_params, handle_get, handle_update, HandleError};
pub use native::build_router;
pub use registry::{
    ServiceDirectory, ServiceId, ServiceInfo, ServiceParams, ServiceRegistry, ServiceSnapshot,
};
