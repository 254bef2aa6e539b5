//! Metric engine: aggregates over the filtered set
//!
//! Metrics are a side channel. They are computed before pagination and never
//! influence which items are returned.

use crate::core::cell::{DataCell, folded_property};
use crate::core::value::ComparableValue;
use indexmap::IndexMap;

/// Group key for cells whose group-by property is absent
pub const UNKNOWN_GROUP: &str = "unknown";

/// Per-group aggregate values, in first-seen group order
pub type MetricGroups = IndexMap<String, u64>;

/// Metric results keyed by group-by property
pub type Metrics = IndexMap<String, MetricGroups>;

/// Supported aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationKind {
    #[default]
    Count,
}

/// One aggregation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRequest {
    pub group_by: String,
    pub kind: AggregationKind,
}

impl MetricRequest {
    pub fn count_by(group_by: impl Into<String>) -> Self {
        Self {
            group_by: group_by.into(),
            kind: AggregationKind::Count,
        }
    }

    /// Aggregate the given cells
    pub fn compute<C: DataCell>(&self, cells: &[C]) -> MetricGroups {
        match self.kind {
            AggregationKind::Count => count_by(cells, &self.group_by),
        }
    }
}

fn count_by<C: DataCell>(cells: &[C], property: &str) -> MetricGroups {
    let mut groups = MetricGroups::new();

    for cell in cells {
        for key in group_keys(folded_property(cell, property)) {
            *groups.entry(key).or_insert(0) += 1;
        }
    }

    groups
}

/// Keys a value is counted under: one per list element, `unknown` when
/// there is nothing to group by.
fn group_keys(value: Option<ComparableValue>) -> Vec<String> {
    match value {
        Some(ComparableValue::List(items)) if !items.is_empty() => {
            items.iter().map(ToString::to_string).collect()
        }
        Some(ComparableValue::List(_)) | None => vec![UNKNOWN_GROUP.to_string()],
        Some(value) => vec![value.to_string()],
    }
}

/// The aggregations requested for one query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricQuery {
    requests: Vec<MetricRequest>,
}

impl MetricQuery {
    pub fn new(requests: Vec<MetricRequest>) -> Self {
        Self { requests }
    }

    pub fn push(&mut self, request: MetricRequest) {
        self.requests.push(request);
    }

    pub fn requests(&self) -> &[MetricRequest] {
        &self.requests
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Run every request over the cells
    pub fn compute<C: DataCell>(&self, cells: &[C]) -> Metrics {
        self.requests
            .iter()
            .map(|request| (request.group_by.clone(), request.compute(cells)))
            .collect()
    }
}
