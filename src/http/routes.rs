//! Router construction.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use super::{handlers, AppState};

/// Build the axum [`Router`] exposing the drift-scoring HTTP surface.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/embed", post(handlers::embed))
        .route("/preprocess", post(handlers::preprocess_handler))
        .route("/similarity", post(handlers::similarity))
        .route("/drift", post(handlers::drift))
        .route("/entity-overlap", post(handlers::entity_overlap))
        .route("/analyze-message", post(handlers::analyze_message_handler))
        .route("/analyze-drift", post(handlers::analyze_drift))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
