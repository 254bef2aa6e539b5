//! Sort engine

use crate::core::cell::{DataCell, folded_property};
use crate::core::value::ComparableValue;
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parse a direction as accepted in query strings
    ///
    /// # Format
    /// - `asc`, `a`, `ascending`
    /// - `desc`, `d`, `descending`
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "a" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "d" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Single-key sort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortQuery {
    pub property: String,
    pub direction: SortDirection,
}

impl SortQuery {
    pub fn new(property: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }

    pub fn ascending(property: impl Into<String>) -> Self {
        Self::new(property, SortDirection::Ascending)
    }

    pub fn descending(property: impl Into<String>) -> Self {
        Self::new(property, SortDirection::Descending)
    }

    /// Compare two sort keys
    ///
    /// Absent keys go last whichever the direction.
    pub fn compare_keys(
        &self,
        a: &Option<ComparableValue>,
        b: &Option<ComparableValue>,
    ) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => self.direction.apply(a.total_cmp(b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Order cells by the sort property
    ///
    /// The sort is stable, so cells with equal keys keep their input order.
    pub fn apply<C: DataCell>(&self, cells: Vec<C>) -> Vec<C> {
        let mut keyed: Vec<(Option<ComparableValue>, C)> = cells
            .into_iter()
            .map(|cell| (folded_property(&cell, &self.property), cell))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| self.compare_keys(a, b));

        keyed.into_iter().map(|(_, cell)| cell).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        id: usize,
        name: Option<&'static str>,
        case_insensitive: bool,
    }

    impl DataCell for Row {
        fn property(&self, name: &str) -> Option<ComparableValue> {
            match name {
                "name" => self.name.map(ComparableValue::from),
                "id" => Some(ComparableValue::from(self.id as i64)),
                _ => None,
            }
        }

        fn is_case_insensitive(&self, name: &str) -> bool {
            self.case_insensitive && name == "name"
        }
    }

    fn rows(names: &[Option<&'static str>]) -> Vec<Row> {
        names
            .iter()
            .enumerate()
            .map(|(id, name)| Row {
                id,
                name: *name,
                case_insensitive: false,
            })
            .collect()
    }

    fn ids(rows: &[Row]) -> Vec<usize> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Ascending));
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Descending));
        assert_eq!(SortDirection::parse("d"), Some(SortDirection::Descending));
        assert_eq!(SortDirection::parse("sideways"), None);
    }

    #[test]
    fn test_ascending_and_descending() {
        let input = rows(&[Some("c"), Some("a"), Some("b")]);

        let sorted = SortQuery::ascending("name").apply(input.clone());
        assert_eq!(ids(&sorted), vec![1, 2, 0]);

        let sorted = SortQuery::descending("name").apply(input);
        assert_eq!(ids(&sorted), vec![0, 2, 1]);
    }

    #[test]
    fn test_absent_sorts_last_in_both_directions() {
        let input = rows(&[None, Some("b"), None, Some("a")]);

        let sorted = SortQuery::ascending("name").apply(input.clone());
        assert_eq!(ids(&sorted), vec![3, 1, 0, 2]);

        let sorted = SortQuery::descending("name").apply(input);
        assert_eq!(ids(&sorted), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_unknown_property_keeps_input_order() {
        let input = rows(&[Some("c"), Some("a"), Some("b")]);
        let sorted = SortQuery::descending("missing").apply(input);
        assert_eq!(ids(&sorted), vec![0, 1, 2]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let input = rows(&[Some("x"), Some("a"), Some("x"), Some("a"), Some("x")]);

        let sorted = SortQuery::ascending("name").apply(input.clone());
        assert_eq!(ids(&sorted), vec![1, 3, 0, 2, 4]);

        let sorted = SortQuery::descending("name").apply(input);
        assert_eq!(ids(&sorted), vec![0, 2, 4, 1, 3]);
    }

    #[test]
    fn test_numeric_sort_is_not_lexicographic() {
        let input = rows(&[None; 12]);
        let sorted = SortQuery::descending("id").apply(input);
        assert_eq!(ids(&sorted), (0..12).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_case_insensitive_property_sorts_folded() {
        let mut input = rows(&[Some("beta"), Some("Alpha"), Some("alpha"), Some("Charlie")]);
        for row in &mut input {
            row.case_insensitive = true;
        }
        let sorted = SortQuery::ascending("name").apply(input);
        // "Alpha" and "alpha" tie and keep input order
        assert_eq!(ids(&sorted), vec![1, 2, 0, 3]);
    }
}
