//! HTTP surface: request handlers exposing the drift-scoring pipeline.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod types;

use std::sync::Arc;

use crate::analyzer::Analyzer;
use crate::encoder::Encoder;

/// Shared, immutable application state handed to every handler. Both
/// capabilities are loaded once at startup and held for the process
/// lifetime — there is no mutable shared state beyond them, so no lock is
/// needed here.
pub struct AppState {
    pub analyzer: Arc<dyn Analyzer>,
    pub encoder: Arc<dyn Encoder>,
    pub device: String,
}

pub use routes::build_router;
