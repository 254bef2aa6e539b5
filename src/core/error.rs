//! Typed errors for the layers around the selection pipeline
//!
//! The pipeline itself never fails. Errors come from the two places that
//! surround it:
//!
//! - [`QueryError`]: request parameters that cannot be turned into a query
//! - [`SelectError::Source`]: the item collection could not be loaded
//!
//! # Example
//!
//! ```rust,ignore
//! match QueryParams::from_pairs(pairs).into_query(&config.pagination) {
//!     Ok(query) => { /* run the selection */ }
//!     Err(QueryError::MalformedFilter(raw)) => println!("bad filter: {}", raw),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Request parameters that do not describe a valid query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid value for `{param}`: expected an integer, got `{value}`")]
    InvalidNumber { param: &'static str, value: String },

    #[error("malformed filterBy expression `{0}`, expected <property>:<value>")]
    MalformedFilter(String),

    #[error("malformed range `{0}`, expected [<low>,<high>]")]
    MalformedRange(String),

    #[error("invalid sort direction `{0}`, expected asc or desc")]
    InvalidSortDirection(String),

    #[error("failed to decode query string: {0}")]
    Encoding(String),
}

/// Errors surfaced by list endpoints
#[derive(Debug, Error)]
pub enum SelectError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("failed to load {kind}: {source}")]
    Source {
        kind: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl SelectError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SelectError::Query(_) => StatusCode::BAD_REQUEST,
            SelectError::Source { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SelectError::Query(_) => "INVALID_QUERY",
            SelectError::Source { .. } => "SOURCE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            SelectError::Query(QueryError::InvalidNumber { param, value }) => {
                Some(serde_json::json!({ "param": param, "value": value }))
            }
            SelectError::Source { kind, .. } => Some(serde_json::json!({ "kind": kind })),
            _ => None,
        }
    }
}

impl IntoResponse for SelectError {
    fn into_response(self) -> Response {
        if let SelectError::Source { kind, source } = &self {
            tracing::error!(kind = %kind, error = %source, "item source failed");
        }

        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_maps_to_bad_request() {
        let err = SelectError::from(QueryError::MalformedFilter("status".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_QUERY");

        let response = err.to_response();
        assert_eq!(
            response.message,
            "malformed filterBy expression `status`, expected <property>:<value>"
        );
        assert!(response.details.is_none());
    }

    #[test]
    fn test_invalid_number_has_details() {
        let err = SelectError::from(QueryError::InvalidNumber {
            param: "page",
            value: "abc".to_string(),
        });
        let response = err.to_response();
        assert_eq!(response.code, "INVALID_QUERY");
        assert_eq!(
            response.details,
            Some(serde_json::json!({ "param": "page", "value": "abc" }))
        );
    }

    #[test]
    fn test_source_error_maps_to_internal() {
        let err = SelectError::Source {
            kind: "secret".to_string(),
            source: anyhow::anyhow!("connection refused"),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "SOURCE_ERROR");
        assert_eq!(err.to_string(), "failed to load secret: connection refused");
    }

    #[test]
    fn test_into_response_status() {
        let response = SelectError::from(QueryError::InvalidSortDirection("up".to_string()))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
