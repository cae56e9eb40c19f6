//! driftomed — the drift-core daemon.
//!
//! Loads the analyzer and encoder once at startup and serves the HTTP
//! surface:
//!
//! - `GET  /health`
//! - `POST /embed`
//! - `POST /preprocess`
//! - `POST /similarity`
//! - `POST /drift`
//! - `POST /entity-overlap`
//! - `POST /analyze-message`
//! - `POST /analyze-drift`
//!
//! Build and run: `cargo run --bin driftomed`

use std::sync::Arc;

use drift_core::analyzer::rule_based::RuleAnalyzer;
use drift_core::config::ServerConfig;
use drift_core::encoder::hashing::HashingEncoder;
use drift_core::encoder::Encoder;
use drift_core::http::{build_router, AppState};
use drift_core::logging;
use drift_core::paths::DriftPaths;

#[cfg(feature = "neural-embeddings")]
use drift_core::encoder::onnx::OnnxEncoder;

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("invalid configuration: {e}");
        std::process::exit(1);
    });

    logging::init(&config);

    let paths = DriftPaths::resolve().unwrap_or_else(|e| {
        tracing::error!("failed to resolve cache directories: {e}");
        std::process::exit(1);
    });
    if let Err(e) = paths.ensure_dirs() {
        tracing::error!("failed to create cache directories: {e}");
        std::process::exit(1);
    }

    let analyzer: Arc<dyn drift_core::analyzer::Analyzer> = Arc::new(RuleAnalyzer::new());

    #[cfg(feature = "neural-embeddings")]
    let (encoder, device): (Arc<dyn Encoder>, &str) =
        match OnnxEncoder::load(&paths.models_dir(), &config.embedding_model, 384) {
            Ok(enc) => (Arc::new(enc), "onnx"),
            Err(e) => {
                tracing::warn!("neural encoder unavailable, falling back to hashing encoder: {e}");
                (Arc::new(HashingEncoder::default()), "cpu-hash")
            }
        };

    #[cfg(not(feature = "neural-embeddings"))]
    let (encoder, device): (Arc<dyn Encoder>, &str) =
        (Arc::new(HashingEncoder::default()), "cpu-hash");

    tracing::info!(
        model = encoder.model_id(),
        dimension = encoder.dimension(),
        "drift-core initialized"
    );

    let state = Arc::new(AppState {
        analyzer,
        encoder,
        device: device.to_string(),
    });

    let app = build_router(state);

    let addr = config.addr();
    tracing::info!("driftomed listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let ctrl_c = tokio::signal::ctrl_c();
            #[cfg(unix)]
            {
                let mut sigterm =
                    tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                        .expect("failed to register SIGTERM handler");
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            #[cfg(not(unix))]
            {
                ctrl_c.await.ok();
            }
            tracing::info!("driftomed shutting down");
        })
        .await
        .expect("server error");
}
