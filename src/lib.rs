//! # dataselect
//!
//! A generic selection pipeline for listing resources: filter, sort,
//! paginate and aggregate any collection through a uniform cell view, and
//! serve it over HTTP.
//!
//! ## Features
//!
//! - **Cell Abstraction**: Every resource kind is normalized into cells exposing named comparable values
//! - **Filter / Sort / Paginate**: One query descriptor drives all list endpoints
//! - **Metrics**: Grouped counts over the filtered set, independent of paging
//! - **Macro-based Entities**: `impl_data_entity!` gives an entity its cell view for free
//! - **Configuration-Based**: Pagination defaults and server settings from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dataselect::prelude::*;
//!
//! impl_data_entity!(
//!     Device,
//!     "device",
//!     "devices",
//!     ["name"],
//!     {
//!         product_id: String,
//!         online: bool,
//!     }
//! );
//!
//! let query = DataSelectQuery::new()
//!     .with_filter(FilterCriterion::equals("online", true))
//!     .with_sort(SortQuery::ascending("name"))
//!     .with_pagination(PaginationQuery::new(1, 20))
//!     .with_metric(MetricRequest::count_by("product_id"));
//!
//! let page = select(&EntityAdapter::<Device>::new(), devices, &query);
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod resources;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        cell::{CellAdapter, DataCell, EntityAdapter, EntityCell},
        entity::{Data, Entity},
        store::ItemStore,
        value::{ComparableValue, ToComparable, ValueKind},
    };

    // === Pipeline ===
    pub use crate::core::{
        error::{QueryError, SelectError},
        extractors::SelectQuery,
        filter::{FilterCriterion, FilterQuery, Matcher},
        metric::{MetricRequest, Metrics},
        pagination::PaginationQuery,
        query::QueryParams,
        select::{DataSelectQuery, ListMeta, ResultEnvelope, select, select_cells},
        sort::{SortDirection, SortQuery},
    };

    // === Macros ===
    pub use crate::impl_data_entity;

    // === Resources ===
    pub use crate::resources::{
        ClusterSecret, ObjectMeta, Product, RuleChainMsgLog, Secret, SecretResource, SecretType,
        to_secret_list,
    };

    // === Storage ===
    pub use crate::storage::InMemoryStore;

    // === Config ===
    pub use crate::config::{PaginationConfig, SelectConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{ListResource, ResourceDescriptor, ResourceRegistry, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
