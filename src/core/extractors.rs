//! Axum extractor for selection queries
//!
//! [`SelectQuery`] reads the request's query string (repeated `filterBy` and
//! `metricBy` keys included) and turns it into a [`DataSelectQuery`] using
//! the [`SelectConfig`] found in the router state.

use crate::config::SelectConfig;
use crate::core::error::{QueryError, SelectError};
use crate::core::query::QueryParams;
use crate::core::select::DataSelectQuery;
use axum::extract::{FromRef, FromRequestParts, Query};
use axum::http::request::Parts;
use std::sync::Arc;

/// Extractor for the selection query of a list request
///
/// Rejects with [`SelectError::Query`] (400) when the parameters are
/// malformed.
#[derive(Debug, Clone)]
pub struct SelectQuery(pub DataSelectQuery);

impl<S> FromRequestParts<S> for SelectQuery
where
    S: Send + Sync,
    Arc<SelectConfig>: FromRef<S>,
{
    type Rejection = SelectError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<SelectConfig>::from_ref(state);

        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|rejection| QueryError::Encoding(rejection.body_text()))?;

        let query = QueryParams::from_pairs(pairs).into_query(&config.pagination)?;
        Ok(SelectQuery(query))
    }
}
