//! TrustGate gateway daemon.
//!
//! Answers user questions with retrieval-grounded generation and wraps every
//! answer in a verifiable trust envelope: confidence score, citations,
//! Ed25519 signature and a permanent audit record.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trustgate_gateway::error::GatewayError;
use trustgate_gateway::{GatewayConfig, GatewayResult, Server};

/// TrustGate gateway CLI.
#[derive(Parser)]
#[command(name = "trustgated")]
#[command(about = "TrustGate - signed trust envelopes for retrieval-augmented answers", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TRUSTGATE_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(short, long, env = "TRUSTGATE_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level
    #[arg(long, env = "TRUSTGATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "TRUSTGATE_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> GatewayResult<()> {
    let cli = Cli::parse();

    let mut config = GatewayConfig::load(cli.config.as_deref())
        .map_err(|e| GatewayError::Config(e.to_string()))?;

    // CLI args override file/env configuration.
    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| GatewayError::Config(format!("invalid listen address: {e}")))?;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.json = true;
    }

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.server.listen_addr,
        "starting trustgate gateway"
    );

    let server = Server::new(config).await?;
    server.run().await
}
