//! Query parameters and their translation into a [`DataSelectQuery`]

use crate::config::PaginationConfig;
use crate::core::error::QueryError;
use crate::core::filter::{FilterCriterion, Matcher};
use crate::core::metric::MetricRequest;
use crate::core::pagination::PaginationQuery;
use crate::core::select::DataSelectQuery;
use crate::core::sort::{SortDirection, SortQuery};
use crate::core::value::ComparableValue;
use std::num::IntErrorKind;

/// Raw selection parameters collected from a query string
///
/// `filterBy` and `metricBy` may repeat, which is why this is built from
/// key/value pairs rather than deserialized into a struct. Unknown keys and
/// empty values are ignored.
///
/// # Example
/// ```rust,ignore
/// // In handler:
/// pub async fn list_items(
///     Query(pairs): Query<Vec<(String, String)>>,
/// ) -> Result<Json<ResultEnvelope<Item>>, SelectError> {
///     let query = QueryParams::from_pairs(pairs).into_query(&config.pagination)?;
///     ...
/// }
///
/// // Usage:
/// GET /secrets?filterBy=namespace:default&sortBy=name&sortDirection=desc
/// GET /products?filterBy=name:~gateway&page=2&itemsPerPage=10
/// GET /products?filterBy=created_at:[2024-01-01,2024-06-30]&metricBy=status
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Filter expressions
    ///
    /// # Format
    /// - Equality: `property:value`
    /// - Contains: `property:~value`
    /// - Inclusive range: `property:[low,high]`
    pub filter_by: Vec<String>,

    /// Sort property, optionally suffixed with `:asc` or `:desc`
    pub sort_by: Option<String>,

    /// Sort direction, `asc` or `desc`
    pub sort_direction: Option<String>,

    /// Page number (starts at 1), also accepted as `pageNum`
    pub page: Option<String>,

    /// Number of items per page, also accepted as `pageSize`
    pub items_per_page: Option<String>,

    /// Properties to count items by
    pub metric_by: Vec<String>,
}

impl QueryParams {
    /// Collect parameters from decoded key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let value: String = value.into();
            if value.trim().is_empty() {
                continue;
            }

            match key.as_ref() {
                "filterBy" => params.filter_by.push(value),
                "sortBy" => params.sort_by = Some(value),
                "sortDirection" => params.sort_direction = Some(value),
                "page" | "pageNum" => params.page = Some(value),
                "itemsPerPage" | "pageSize" => params.items_per_page = Some(value),
                "metricBy" => params.metric_by.push(value),
                _ => {}
            }
        }

        params
    }

    /// Build the query these parameters describe
    ///
    /// Pagination is only enabled when a page or a page size is given; the
    /// missing half falls back to page 1 or the configured default size.
    pub fn into_query(self, config: &PaginationConfig) -> Result<DataSelectQuery, QueryError> {
        let mut query = DataSelectQuery::new();

        for raw in &self.filter_by {
            query = query.with_filter(parse_filter(raw)?);
        }

        if let Some(sort) = parse_sort(self.sort_by.as_deref(), self.sort_direction.as_deref())? {
            query = query.with_sort(sort);
        }

        if self.page.is_some() || self.items_per_page.is_some() {
            let page = match &self.page {
                Some(raw) => parse_int("page", raw)?,
                None => 1,
            };
            let items_per_page = match &self.items_per_page {
                Some(raw) => parse_int("itemsPerPage", raw)?,
                None => to_i64(config.default_items_per_page),
            };
            let items_per_page = match config.max_items_per_page {
                Some(max) => items_per_page.min(to_i64(max)),
                None => items_per_page,
            };
            query = query.with_pagination(PaginationQuery::new(page, items_per_page));
        }

        for property in self.metric_by {
            query = query.with_metric(MetricRequest::count_by(property.trim()));
        }

        Ok(query)
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Parse an integer parameter, saturating values outside the `i64` range
fn parse_int(param: &'static str, raw: &str) -> Result<i64, QueryError> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Ok(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(QueryError::InvalidNumber {
                param,
                value: raw.to_string(),
            }),
        },
    }
}

/// Parse `property:expr` into a criterion
fn parse_filter(raw: &str) -> Result<FilterCriterion, QueryError> {
    let Some((property, expr)) = raw.split_once(':') else {
        return Err(QueryError::MalformedFilter(raw.to_string()));
    };
    let property = property.trim();
    if property.is_empty() {
        return Err(QueryError::MalformedFilter(raw.to_string()));
    }

    let expr = expr.trim();
    let matcher = if let Some(needle) = expr.strip_prefix('~') {
        Matcher::Contains(ComparableValue::from(needle.trim()))
    } else if expr.starts_with('[') {
        parse_range(expr)?
    } else {
        Matcher::Equals(ComparableValue::from(expr))
    };

    Ok(FilterCriterion::new(property, matcher))
}

fn parse_range(expr: &str) -> Result<Matcher, QueryError> {
    let bounds = expr
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .and_then(|inner| inner.split_once(','));

    match bounds {
        Some((low, high)) if !low.trim().is_empty() && !high.trim().is_empty() => {
            Ok(Matcher::InRange {
                low: ComparableValue::from(low.trim()),
                high: ComparableValue::from(high.trim()),
            })
        }
        _ => Err(QueryError::MalformedRange(expr.to_string())),
    }
}

fn parse_sort(
    sort_by: Option<&str>,
    direction: Option<&str>,
) -> Result<Option<SortQuery>, QueryError> {
    let Some(sort_by) = sort_by else {
        return Ok(None);
    };

    // With an explicit sortDirection, a suffix that names no direction is
    // part of the property name
    let (property, suffix) = match sort_by.rsplit_once(':') {
        Some((property, suffix))
            if direction.is_none() || SortDirection::parse(suffix).is_some() =>
        {
            (property, Some(suffix))
        }
        _ => (sort_by, None),
    };

    // An explicit sortDirection wins over a suffix on sortBy
    let direction = match direction.or(suffix) {
        Some(raw) => SortDirection::parse(raw)
            .ok_or_else(|| QueryError::InvalidSortDirection(raw.to_string()))?,
        None => SortDirection::Ascending,
    };

    Ok(Some(SortQuery::new(property.trim(), direction)))
}
