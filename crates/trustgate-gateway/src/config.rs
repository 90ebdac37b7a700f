//! Configuration for the TrustGate gateway.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Main gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Audit storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Signing key lifecycle
    #[serde(default)]
    pub signing: SigningConfig,

    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Answer generator configuration
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub listen_addr: SocketAddr,

    /// Enable permissive CORS (tighten in production)
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".parse().expect("valid default address"),
            enable_cors: true,
        }
    }
}

/// Audit storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// In-memory storage (development/testing; entries do not survive
    /// restart)
    Memory,

    /// PostgreSQL storage (system of record)
    Postgres {
        /// Connection URL
        url: String,

        /// Maximum connections in pool
        #[serde(default = "default_pool_size")]
        max_connections: u32,

        /// Connection timeout in seconds
        #[serde(default = "default_connection_timeout")]
        connect_timeout_secs: u64,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Memory
    }
}

/// Signing key lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SigningConfig {
    /// Path to the persisted signing key. Loaded on start, or generated and
    /// persisted on first run, so envelopes stay verifiable across restarts.
    /// When unset a fresh in-memory key is generated per process.
    pub key_path: Option<PathBuf>,
}

/// Retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of passages handed to the generator per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// JSON file with the passage corpus served by the bundled retriever
    pub passages_path: Option<PathBuf>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            passages_path: None,
        }
    }
}

/// Answer generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// OpenAI-compatible completions endpoint. When unset the gateway falls
    /// back to the deterministic extractive generator.
    pub endpoint: Option<String>,

    /// Model name sent to the endpoint
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: default_model(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_true() -> bool {
    true
}

fn default_pool_size() -> u32 {
    10
}

fn default_connection_timeout() -> u64 {
    5
}

fn default_top_k() -> usize {
    3
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl GatewayConfig {
    /// Load configuration: defaults, then optional file, then `TRUSTGATE_*`
    /// environment variables.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&GatewayConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("TRUSTGATE")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.server.listen_addr.port(), 8080);
        assert!(matches!(config.storage, StorageConfig::Memory));
        assert!(config.signing.key_path.is_none());
        assert_eq!(config.retrieval.top_k, 3);
    }

    #[test]
    fn server_defaults() {
        let config = ServerConfig::default();
        assert!(config.enable_cors);
    }

    #[test]
    fn generator_defaults_to_extractive_fallback() {
        let config = GeneratorConfig::default();
        assert!(config.endpoint.is_none());
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let config = GatewayConfig::load(Some("/nonexistent/trustgate.toml")).unwrap();
        assert_eq!(config.retrieval.top_k, 3);
        assert!(matches!(config.storage, StorageConfig::Memory));
    }
}
