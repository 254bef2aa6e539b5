//! Query executor
//!
//! Runs a [`DataSelectQuery`] over a collection in a fixed order:
//!
//! 1. normalize items into cells
//! 2. filter
//! 3. snapshot the filtered count and compute metrics
//! 4. sort
//! 5. paginate
//! 6. convert the remaining cells back into items
//!
//! Metrics therefore always describe the filtered universe, and pages are
//! always cut from the sorted sequence.
//!
//! # Example
//!
//! ```rust,ignore
//! let query = DataSelectQuery::new()
//!     .with_filter(FilterCriterion::equals("status", "ok"))
//!     .with_sort(SortQuery::ascending("name"))
//!     .with_pagination(PaginationQuery::new(1, 2))
//!     .with_metric(MetricRequest::count_by("status"));
//!
//! let envelope = select(&EntityAdapter::<Product>::new(), products, &query);
//! ```

use crate::core::cell::{CellAdapter, DataCell};
use crate::core::filter::{FilterCriterion, FilterQuery};
use crate::core::metric::{MetricQuery, MetricRequest, Metrics};
use crate::core::pagination::PaginationQuery;
use crate::core::sort::SortQuery;
use serde::Serialize;

/// Immutable description of one selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSelectQuery {
    filter: FilterQuery,
    sort: Option<SortQuery>,
    pagination: Option<PaginationQuery>,
    metrics: MetricQuery,
}

impl DataSelectQuery {
    /// A query that returns everything in input order
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, criterion: FilterCriterion) -> Self {
        self.filter.push(criterion);
        self
    }

    pub fn with_sort(mut self, sort: SortQuery) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationQuery) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_metric(mut self, request: MetricRequest) -> Self {
        self.metrics.push(request);
        self
    }

    pub fn filter(&self) -> &FilterQuery {
        &self.filter
    }

    pub fn sort(&self) -> Option<&SortQuery> {
        self.sort.as_ref()
    }

    pub fn pagination(&self) -> Option<&PaginationQuery> {
        self.pagination.as_ref()
    }

    pub fn metrics(&self) -> &MetricQuery {
        &self.metrics
    }
}

/// Count metadata of a selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    /// Number of items handed to the selection
    #[serde(skip)]
    pub total_items_before_filter: usize,

    /// Number of items left after filtering, before pagination
    pub total_items: usize,
}

/// Selected cells with their metadata
#[derive(Debug, Clone)]
pub struct CellSelection<C> {
    pub cells: Vec<C>,
    pub list_meta: ListMeta,
    pub metrics: Option<Metrics>,
}

/// Result of a selection, serialized directly as a response body
///
/// ```json
/// { "listMeta": { "totalItems": 3 }, "items": [ ... ], "metrics": { ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope<T> {
    pub list_meta: ListMeta,
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

impl<T> ResultEnvelope<T> {
    /// Convert the items, keeping counts and metrics
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultEnvelope<U> {
        ResultEnvelope {
            list_meta: self.list_meta,
            items: self.items.into_iter().map(f).collect(),
            metrics: self.metrics,
        }
    }
}

/// Run a query over already normalized cells
pub fn select_cells<C: DataCell>(cells: Vec<C>, query: &DataSelectQuery) -> CellSelection<C> {
    let total_items_before_filter = cells.len();

    let cells = query.filter.apply(cells);
    let total_items = cells.len();

    let metrics = if query.metrics.is_empty() {
        None
    } else {
        Some(query.metrics.compute(&cells))
    };

    let cells = match &query.sort {
        Some(sort) => sort.apply(cells),
        None => cells,
    };

    let cells = match &query.pagination {
        Some(pagination) => pagination.apply(cells),
        None => cells,
    };

    tracing::debug!(
        before_filter = total_items_before_filter,
        after_filter = total_items,
        returned = cells.len(),
        "data select completed"
    );

    CellSelection {
        cells,
        list_meta: ListMeta {
            total_items_before_filter,
            total_items,
        },
        metrics,
    }
}

/// Run a query over typed items through their adapter
pub fn select<A: CellAdapter>(
    adapter: &A,
    items: Vec<A::Item>,
    query: &DataSelectQuery,
) -> ResultEnvelope<A::Item> {
    let selection = select_cells(adapter.to_cells(items), query);

    ResultEnvelope {
        list_meta: selection.list_meta,
        items: adapter.from_cells(selection.cells),
        metrics: selection.metrics,
    }
}
