//! Cells and the adapters that produce them
//!
//! A cell is the read-only view the selection pipeline works on: it exposes
//! named [`ComparableValue`]s and nothing else, so the filter, sort,
//! pagination and metric stages never need to know which resource kind they
//! are processing.
//!
//! Every resource kind registers exactly one [`CellAdapter`] that turns its
//! items into cells and back. Entities get one for free through
//! [`EntityAdapter`].

use crate::core::entity::Data;
use crate::core::value::ComparableValue;
use std::marker::PhantomData;

/// A normalized, read-only view of one item
pub trait DataCell {
    /// Value of the named property, `None` when the item lacks it
    fn property(&self, name: &str) -> Option<ComparableValue>;

    /// Whether string comparisons on this property ignore case
    fn is_case_insensitive(&self, _name: &str) -> bool {
        false
    }
}

/// Converts the items of one resource kind into cells and back
///
/// `from_cells(to_cells(items))` must give back exactly `items`, in order.
pub trait CellAdapter {
    /// The typed item handed in by callers
    type Item;

    /// The cell wrapping one item
    type Cell: DataCell;

    fn to_cell(&self, item: Self::Item) -> Self::Cell;

    fn from_cell(&self, cell: Self::Cell) -> Self::Item;

    fn to_cells(&self, items: Vec<Self::Item>) -> Vec<Self::Cell> {
        items.into_iter().map(|item| self.to_cell(item)).collect()
    }

    fn from_cells(&self, cells: Vec<Self::Cell>) -> Vec<Self::Item> {
        cells.into_iter().map(|cell| self.from_cell(cell)).collect()
    }
}

/// Property lookup honoring the cell's case rules: values of
/// case-insensitive properties come back lowercased.
pub(crate) fn folded_property<C: DataCell>(cell: &C, name: &str) -> Option<ComparableValue> {
    let value = cell.property(name)?;
    if cell.is_case_insensitive(name) {
        Some(value.fold_case())
    } else {
        Some(value)
    }
}

/// Cell over any [`Data`] entity
#[derive(Debug, Clone)]
pub struct EntityCell<T>(T);

impl<T: Data> EntityCell<T> {
    pub fn new(entity: T) -> Self {
        Self(entity)
    }

    pub fn entity(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Data> DataCell for EntityCell<T> {
    fn property(&self, name: &str) -> Option<ComparableValue> {
        self.0.property(name)
    }

    fn is_case_insensitive(&self, name: &str) -> bool {
        T::indexed_fields().contains(&name)
    }
}

/// Adapter for any [`Data`] entity
pub struct EntityAdapter<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> EntityAdapter<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for EntityAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EntityAdapter<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for EntityAdapter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityAdapter")
            .field("entity", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Data> CellAdapter for EntityAdapter<T> {
    type Item = T;
    type Cell = EntityCell<T>;

    fn to_cell(&self, item: T) -> EntityCell<T> {
        EntityCell::new(item)
    }

    fn from_cell(&self, cell: EntityCell<T>) -> T {
        cell.into_inner()
    }
}
