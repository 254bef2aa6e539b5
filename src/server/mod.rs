//! Server module for building HTTP servers with auto-registered list routes
//!
//! This module provides a `ServerBuilder` that registers:
//! - `GET /{plural}` for every resource kind, run through the selection pipeline
//! - Introspection routes for API discovery

pub mod builder;
pub mod handlers;
pub mod registry;

pub use builder::{ResourceInfo, ServerBuilder};
pub use handlers::{ListResource, ListState, list_resources};
pub use registry::{ResourceDescriptor, ResourceRegistry};
