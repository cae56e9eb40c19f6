//! Converts [`DriftError`] into an HTTP response.
//!
//! Centralized into a single [`IntoResponse`] impl since this surface has
//! one rich error enum rather than ad hoc string errors per call site.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::DriftError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for DriftError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
