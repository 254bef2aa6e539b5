//! Core module containing the selection pipeline and its building blocks

pub mod cell;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod filter;
pub mod metric;
pub mod pagination;
pub mod query;
pub mod select;
pub mod sort;
pub mod store;
pub mod value;

pub use cell::{CellAdapter, DataCell, EntityAdapter, EntityCell};
pub use entity::{Data, Entity};
pub use error::{ErrorResponse, QueryError, SelectError};
pub use extractors::SelectQuery;
pub use filter::{FilterCriterion, FilterQuery, Matcher};
pub use metric::{AggregationKind, MetricGroups, MetricQuery, MetricRequest, Metrics};
pub use pagination::PaginationQuery;
pub use query::QueryParams;
pub use select::{CellSelection, DataSelectQuery, ListMeta, ResultEnvelope, select, select_cells};
pub use sort::{SortDirection, SortQuery};
pub use store::ItemStore;
pub use value::{ComparableValue, ToComparable, ValueKind};
