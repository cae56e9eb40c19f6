//! Rich diagnostic error types for the drift-core engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives, providing error codes, help text, and source chains. `DriftError`
//! is the top-level union the HTTP surface converts into status codes
//! (`http::error`) following the taxonomy: model-unavailable → 503,
//! malformed input → 400, downstream compute failure → 500.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the drift-core engine.
#[derive(Debug, Error, Diagnostic)]
pub enum DriftError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Encoder(#[from] EncoderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Analyzer(#[from] AnalyzerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] crate::paths::PathError),
}

impl DriftError {
    /// Maps a `DriftError` onto the HTTP status code its taxonomy bucket is
    /// assigned: model-unavailable -> 503, malformed input -> 400,
    /// downstream compute failure -> 500.
    pub fn status_code(&self) -> u16 {
        match self {
            DriftError::Encoder(EncoderError::NotLoaded) => 503,
            DriftError::Encoder(_) => 500,
            DriftError::Analyzer(_) => 500,
            DriftError::Request(_) => 400,
            DriftError::Config(_) | DriftError::Path(_) => 500,
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    #[diagnostic(
        code(drift::config::invalid_value),
        help("Check the environment variable value against its documented accepted values.")
    )]
    InvalidValue { var: String, value: String },
}

// ---------------------------------------------------------------------------
// Encoder errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum EncoderError {
    #[error("encoder model is not loaded")]
    #[diagnostic(
        code(drift::encoder::not_loaded),
        help("Wait for startup to finish loading the embedding model, or check EMBEDDING_MODEL.")
    )]
    NotLoaded,

    #[error("encoder inference failed: {message}")]
    #[diagnostic(
        code(drift::encoder::inference_failed),
        help("The embedding backend raised an error during inference. Check the server logs for the full trace.")
    )]
    InferenceFailed { message: String },
}

// ---------------------------------------------------------------------------
// Analyzer errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum AnalyzerError {
    #[error("analyzer failed to parse input: {message}")]
    #[diagnostic(
        code(drift::analyzer::parse_failed),
        help("The linguistic analyzer could not segment this input. Check for malformed unicode or excessively long input.")
    )]
    ParseFailed { message: String },
}

// ---------------------------------------------------------------------------
// Request validation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RequestError {
    #[error("missing required field: {field}")]
    #[diagnostic(
        code(drift::request::missing_field),
        help("Check the request body against the endpoint's documented schema.")
    )]
    MissingField { field: String },

    #[error("vector length mismatch: expected {expected}, got {actual}")]
    #[diagnostic(
        code(drift::request::dim_mismatch),
        help("current_embedding and branch_centroid must have the same dimension as the loaded encoder.")
    )]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("malformed input: {message}")]
    #[diagnostic(
        code(drift::request::malformed),
        help("The request body failed schema validation. Check field types and required fields.")
    )]
    Malformed { message: String },
}

/// Convenience alias for functions returning drift-core results.
pub type DriftResult<T> = std::result::Result<T, DriftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoder_not_loaded_maps_to_503() {
        let err = DriftError::Encoder(EncoderError::NotLoaded);
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn request_errors_map_to_400() {
        let err = DriftError::Request(RequestError::MissingField {
            field: "text".into(),
        });
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn inference_failure_maps_to_500() {
        let err = DriftError::Encoder(EncoderError::InferenceFailed {
            message: "onnx runtime panic".into(),
        });
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn config_error_converts_to_drift_error() {
        let err = ConfigError::InvalidValue {
            var: "DRIFT_SERVER_PORT".into(),
            value: "abc".into(),
        };
        let drift: DriftError = err.into();
        assert!(matches!(
            drift,
            DriftError::Config(ConfigError::InvalidValue { .. })
        ));
    }
}
