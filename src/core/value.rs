//! Comparable property values exposed by cells

use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// The kind of a [`ComparableValue`]
///
/// Values are only ever compared with values of the same kind. The declaration
/// order doubles as the rank used to keep a sort total when one property
/// reports mixed kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    String,
    Number,
    Timestamp,
    Boolean,
    List,
}

/// A normalized property value
///
/// This is the closed set of values a cell can expose. Lists carry
/// list-valued properties such as labels, and are matched by membership.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparableValue {
    String(String),
    Number(f64),
    Timestamp(DateTime<Utc>),
    Boolean(bool),
    List(Vec<ComparableValue>),
}

impl ComparableValue {
    /// Get the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            ComparableValue::String(_) => ValueKind::String,
            ComparableValue::Number(_) => ValueKind::Number,
            ComparableValue::Timestamp(_) => ValueKind::Timestamp,
            ComparableValue::Boolean(_) => ValueKind::Boolean,
            ComparableValue::List(_) => ValueKind::List,
        }
    }

    /// Get the value as a string if possible
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ComparableValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a number if possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ComparableValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the value as a timestamp if possible
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            ComparableValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ComparableValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the elements of a list value
    pub fn as_list(&self) -> Option<&[ComparableValue]> {
        match self {
            ComparableValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Convert this value into the given kind
    ///
    /// A value of the requested kind is returned unchanged. Strings are parsed
    /// into numbers, timestamps (RFC 3339 or a bare `YYYY-MM-DD` date at
    /// midnight UTC) and booleans (`true`/`false`). Every other conversion
    /// yields `None`.
    pub fn coerce_to(&self, kind: ValueKind) -> Option<ComparableValue> {
        if self.kind() == kind {
            return Some(self.clone());
        }

        let ComparableValue::String(raw) = self else {
            return None;
        };
        let raw = raw.trim();

        match kind {
            ValueKind::Number => raw.parse::<f64>().ok().map(ComparableValue::Number),
            ValueKind::Timestamp => parse_timestamp(raw).map(ComparableValue::Timestamp),
            ValueKind::Boolean => match raw {
                "true" => Some(ComparableValue::Boolean(true)),
                "false" => Some(ComparableValue::Boolean(false)),
                _ => None,
            },
            ValueKind::String | ValueKind::List => None,
        }
    }

    /// Compare two values of the same kind
    ///
    /// Returns `None` when the kinds differ (including any element pair of two
    /// lists).
    pub fn compare(&self, other: &ComparableValue) -> Option<Ordering> {
        match (self, other) {
            (ComparableValue::String(a), ComparableValue::String(b)) => Some(a.cmp(b)),
            (ComparableValue::Number(a), ComparableValue::Number(b)) => Some(a.total_cmp(b)),
            (ComparableValue::Timestamp(a), ComparableValue::Timestamp(b)) => Some(a.cmp(b)),
            (ComparableValue::Boolean(a), ComparableValue::Boolean(b)) => Some(a.cmp(b)),
            (ComparableValue::List(a), ComparableValue::List(b)) => {
                for (left, right) in a.iter().zip(b) {
                    match left.compare(right)? {
                        Ordering::Equal => continue,
                        ordering => return Some(ordering),
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            _ => None,
        }
    }

    /// Total order used for sorting: same-kind values compare naturally,
    /// everything else falls back to the kind rank.
    pub fn total_cmp(&self, other: &ComparableValue) -> Ordering {
        self.compare(other)
            .unwrap_or_else(|| self.kind().cmp(&other.kind()))
    }

    /// Lowercase every string inside this value
    pub fn fold_case(&self) -> ComparableValue {
        match self {
            ComparableValue::String(s) => ComparableValue::String(s.to_lowercase()),
            ComparableValue::List(items) => {
                ComparableValue::List(items.iter().map(ComparableValue::fold_case).collect())
            }
            other => other.clone(),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Renders the value the way metric group keys show it
impl fmt::Display for ComparableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparableValue::String(s) => write!(f, "{}", s),
            ComparableValue::Number(n) => write!(f, "{}", n),
            ComparableValue::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
            ComparableValue::Boolean(b) => write!(f, "{}", b),
            ComparableValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for ComparableValue {
    fn from(value: &str) -> Self {
        ComparableValue::String(value.to_string())
    }
}

impl From<String> for ComparableValue {
    fn from(value: String) -> Self {
        ComparableValue::String(value)
    }
}

impl From<f64> for ComparableValue {
    fn from(value: f64) -> Self {
        ComparableValue::Number(value)
    }
}

impl From<i64> for ComparableValue {
    fn from(value: i64) -> Self {
        ComparableValue::Number(value as f64)
    }
}

impl From<i32> for ComparableValue {
    fn from(value: i32) -> Self {
        ComparableValue::Number(f64::from(value))
    }
}

impl From<bool> for ComparableValue {
    fn from(value: bool) -> Self {
        ComparableValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for ComparableValue {
    fn from(value: DateTime<Utc>) -> Self {
        ComparableValue::Timestamp(value)
    }
}

impl<T: Into<ComparableValue>> From<Vec<T>> for ComparableValue {
    fn from(value: Vec<T>) -> Self {
        ComparableValue::List(value.into_iter().map(Into::into).collect())
    }
}

/// Conversion of a field into an optional comparable value
///
/// Used by the entity macros to expose every declared field as a property.
/// `None` means the property is absent (e.g. an unset `Option`).
pub trait ToComparable {
    fn to_comparable(&self) -> Option<ComparableValue>;
}

impl ToComparable for String {
    fn to_comparable(&self) -> Option<ComparableValue> {
        Some(ComparableValue::String(self.clone()))
    }
}

impl ToComparable for str {
    fn to_comparable(&self) -> Option<ComparableValue> {
        Some(ComparableValue::String(self.to_string()))
    }
}

impl ToComparable for bool {
    fn to_comparable(&self) -> Option<ComparableValue> {
        Some(ComparableValue::Boolean(*self))
    }
}

impl ToComparable for DateTime<Utc> {
    fn to_comparable(&self) -> Option<ComparableValue> {
        Some(ComparableValue::Timestamp(*self))
    }
}

impl ToComparable for Uuid {
    fn to_comparable(&self) -> Option<ComparableValue> {
        Some(ComparableValue::String(self.to_string()))
    }
}

macro_rules! numeric_to_comparable {
    ($($ty:ty),*) => {
        $(
            impl ToComparable for $ty {
                fn to_comparable(&self) -> Option<ComparableValue> {
                    Some(ComparableValue::Number(*self as f64))
                }
            }
        )*
    };
}

numeric_to_comparable!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: ToComparable> ToComparable for Option<T> {
    fn to_comparable(&self) -> Option<ComparableValue> {
        self.as_ref().and_then(ToComparable::to_comparable)
    }
}

impl<T: ToComparable> ToComparable for Vec<T> {
    fn to_comparable(&self) -> Option<ComparableValue> {
        Some(ComparableValue::List(
            self.iter().filter_map(ToComparable::to_comparable).collect(),
        ))
    }
}

impl<T: ToComparable + ?Sized> ToComparable for &T {
    fn to_comparable(&self) -> Option<ComparableValue> {
        (**self).to_comparable()
    }
}
