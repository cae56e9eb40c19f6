//! Environment-driven server configuration.
//!
//! Read directly from the process environment at startup rather than
//! through a config-file crate — this service has exactly five knobs and
//! no reason to carry a layered config system for them.

use crate::error::ConfigError;

/// Default encoder identifier, matching the Python original's documented
/// default (`sentence-transformers/paraphrase-MiniLM-L6-v2`).
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/paraphrase-MiniLM-L6-v2";

/// Default drift thresholds for the `/drift` endpoint.
pub const DEFAULT_STAY_THRESHOLD: f32 = 0.38;
pub const DEFAULT_BRANCH_THRESHOLD: f32 = 0.15;

/// Server configuration resolved from the process environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `EMBEDDING_MODEL` — encoder identifier.
    pub embedding_model: String,
    /// `LOG_LEVEL` — default `info`.
    pub log_level: String,
    /// `NODE_ENV` — `production` selects JSON logs.
    pub node_env: String,
    /// `DRIFT_SERVER_BIND` — default `0.0.0.0`.
    pub bind: String,
    /// `DRIFT_SERVER_PORT` — default `8100`.
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from the process environment, applying documented
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let embedding_model =
            std::env::var("EMBEDDING_MODEL").unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string());
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let node_env = std::env::var("NODE_ENV").unwrap_or_default();
        let bind = std::env::var("DRIFT_SERVER_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_raw = std::env::var("DRIFT_SERVER_PORT").unwrap_or_else(|_| "8100".to_string());
        let port: u16 = port_raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                var: "DRIFT_SERVER_PORT".to_string(),
                value: port_raw,
            })?;

        Ok(Self {
            embedding_model,
            log_level,
            node_env,
            bind,
            port,
        })
    }

    /// Whether production (JSON) logging is selected.
    pub fn is_production(&self) -> bool {
        self.node_env == "production"
    }

    /// Socket address string suitable for `TcpListener::bind`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            log_level: "info".to_string(),
            node_env: String::new(),
            bind: "0.0.0.0".to_string(),
            port: 8100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_unset() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.embedding_model, DEFAULT_EMBEDDING_MODEL);
        assert_eq!(cfg.port, 8100);
        assert!(!cfg.is_production());
    }

    #[test]
    fn addr_combines_bind_and_port() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.addr(), "0.0.0.0:8100");
    }

    #[test]
    fn production_flag_tracks_node_env() {
        let mut cfg = ServerConfig::default();
        cfg.node_env = "production".to_string();
        assert!(cfg.is_production());
    }
}
