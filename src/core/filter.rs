//! Filter engine
//!
//! Criteria combine with logical AND. A criterion never raises: an absent
//! property, an unknown property name or a value of the wrong kind simply
//! fails to match, so arbitrary client-supplied keys are safe.

use crate::core::cell::DataCell;
use crate::core::value::{ComparableValue, ValueKind};
use std::cmp::Ordering;

/// How a criterion compares the property against its operand
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Exact equality
    Equals(ComparableValue),

    /// Substring for strings, membership for lists
    Contains(ComparableValue),

    /// Inclusive bounds on numbers and timestamps
    InRange {
        low: ComparableValue,
        high: ComparableValue,
    },
}

/// A single `(property, matcher)` criterion
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriterion {
    pub property: String,
    pub matcher: Matcher,
}

impl FilterCriterion {
    pub fn new(property: impl Into<String>, matcher: Matcher) -> Self {
        Self {
            property: property.into(),
            matcher,
        }
    }

    pub fn equals(property: impl Into<String>, value: impl Into<ComparableValue>) -> Self {
        Self::new(property, Matcher::Equals(value.into()))
    }

    pub fn contains(property: impl Into<String>, value: impl Into<ComparableValue>) -> Self {
        Self::new(property, Matcher::Contains(value.into()))
    }

    pub fn in_range(
        property: impl Into<String>,
        low: impl Into<ComparableValue>,
        high: impl Into<ComparableValue>,
    ) -> Self {
        Self::new(
            property,
            Matcher::InRange {
                low: low.into(),
                high: high.into(),
            },
        )
    }

    /// Check whether a cell satisfies this criterion
    pub fn matches<C: DataCell>(&self, cell: &C) -> bool {
        let Some(value) = cell.property(&self.property) else {
            return false;
        };
        let case_insensitive = cell.is_case_insensitive(&self.property);

        match &self.matcher {
            Matcher::Equals(expected) => values_equal(&value, expected, case_insensitive),
            Matcher::Contains(needle) => contains(&value, needle, case_insensitive),
            Matcher::InRange { low, high } => in_range(&value, low, high),
        }
    }
}

fn values_equal(actual: &ComparableValue, expected: &ComparableValue, case_insensitive: bool) -> bool {
    let Some(expected) = expected.coerce_to(actual.kind()) else {
        return false;
    };

    match (actual, &expected) {
        (ComparableValue::String(a), ComparableValue::String(b)) if case_insensitive => {
            a.to_lowercase() == b.to_lowercase()
        }
        _ => actual.compare(&expected) == Some(Ordering::Equal),
    }
}

fn contains(actual: &ComparableValue, needle: &ComparableValue, case_insensitive: bool) -> bool {
    match actual {
        ComparableValue::String(haystack) => {
            let Some(ComparableValue::String(needle)) = needle.coerce_to(ValueKind::String) else {
                return false;
            };
            if case_insensitive {
                haystack.to_lowercase().contains(&needle.to_lowercase())
            } else {
                haystack.contains(needle.as_str())
            }
        }
        ComparableValue::List(items) => items
            .iter()
            .any(|item| values_equal(item, needle, case_insensitive)),
        _ => false,
    }
}

fn in_range(actual: &ComparableValue, low: &ComparableValue, high: &ComparableValue) -> bool {
    let kind = actual.kind();
    if !matches!(kind, ValueKind::Number | ValueKind::Timestamp) {
        return false;
    }

    let (Some(low), Some(high)) = (low.coerce_to(kind), high.coerce_to(kind)) else {
        return false;
    };

    actual
        .compare(&low)
        .is_some_and(|ordering| ordering != Ordering::Less)
        && actual
            .compare(&high)
            .is_some_and(|ordering| ordering != Ordering::Greater)
}

/// Ordered list of AND-combined criteria
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQuery {
    criteria: Vec<FilterCriterion>,
}

impl FilterQuery {
    pub fn new(criteria: Vec<FilterCriterion>) -> Self {
        Self { criteria }
    }

    pub fn push(&mut self, criterion: FilterCriterion) {
        self.criteria.push(criterion);
    }

    pub fn criteria(&self) -> &[FilterCriterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Check a cell against every criterion
    pub fn matches<C: DataCell>(&self, cell: &C) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(cell))
    }

    /// Keep only the cells matching every criterion, preserving order
    pub fn apply<C: DataCell>(&self, cells: Vec<C>) -> Vec<C> {
        if self.criteria.is_empty() {
            return cells;
        }

        cells.into_iter().filter(|cell| self.matches(cell)).collect()
    }
}
