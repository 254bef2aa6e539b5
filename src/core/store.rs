//! Item source trait
//!
//! The selection pipeline never performs I/O. Whatever fetches the raw items
//! (a cluster API client, a database, an in-memory store) implements
//! [`ItemStore`] and hands a snapshot to the pipeline.

use anyhow::Result;
use async_trait::async_trait;

/// Source of the raw items of one resource kind
#[async_trait]
pub trait ItemStore<T>: Send + Sync {
    /// Fetch every item, unfiltered and unsorted
    async fn list(&self) -> Result<Vec<T>>;
}
