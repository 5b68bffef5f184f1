//! Error types for the reporting engine.
//!
//! Two failure classes cross the API boundary: validation failures (a
//! required filter is missing) abort the request before any query executes
//! and map to 400; row-source failures map to 500. There is no mock-data
//! fallback and no partial result — a failed sub-query fails the request.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::warn;

use crate::api::ApiResponse;

/// Main error type for the reporting engine.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("data source error: {0}")]
    DataSource(#[from] sqlx::Error),
}

impl ReportError {
    /// Validation error for a required request filter that was not supplied.
    pub fn missing_filter(name: &str) -> Self {
        ReportError::Validation(format!("required filter '{name}' is missing"))
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let status = match &self {
            ReportError::Validation(_) => StatusCode::BAD_REQUEST,
            ReportError::DataSource(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("request failed: {self}");
        }
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_filter_names_the_filter() {
        let err = ReportError::missing_filter("outputNumber");
        assert!(matches!(err, ReportError::Validation(_)));
        assert!(err.to_string().contains("outputNumber"));
    }
}
