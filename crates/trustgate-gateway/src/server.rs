//! Server setup and lifecycle management.

use crate::api::{create_router, AppState};
use crate::config::{GatewayConfig, StorageConfig};
use crate::error::{GatewayError, GatewayResult};
use crate::generate::{ExtractiveGenerator, HttpCompletionTransport, PromptGenerator};
use crate::retrieval::StaticRetriever;
use std::sync::Arc;
use tokio::net::TcpListener;
use trustgate_audit::{AuditStore, InMemoryAuditStore, PostgresAuditStore};
use trustgate_pipeline::{AnswerService, Generator, TrustPipeline};
use trustgate_redact::Redactor;
use trustgate_scoring::InverseDistance;
use trustgate_signer::SigningIdentity;

/// TrustGate gateway server.
pub struct Server {
    config: GatewayConfig,
    state: AppState,
}

impl Server {
    /// Construct every owned dependency once: signing identity, audit store,
    /// pipeline, collaborators.
    pub async fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let identity = match &config.signing.key_path {
            Some(path) => Arc::new(SigningIdentity::load_or_generate(path)?),
            None => {
                tracing::warn!(
                    "no signing key path configured; envelopes issued before a restart \
                     will not verify against the next process's key"
                );
                Arc::new(SigningIdentity::generate())
            }
        };
        tracing::info!(key_id = identity.key_id(), "signing identity ready");

        let store: Arc<dyn AuditStore> = match &config.storage {
            StorageConfig::Memory => {
                tracing::warn!("using in-memory audit store; entries will not survive restart");
                Arc::new(InMemoryAuditStore::new())
            }
            StorageConfig::Postgres {
                url,
                max_connections,
                connect_timeout_secs,
            } => Arc::new(
                PostgresAuditStore::connect_with_options(url, *max_connections, *connect_timeout_secs)
                    .await?,
            ),
        };

        let retriever = match &config.retrieval.passages_path {
            Some(path) => StaticRetriever::from_json_file(path)?,
            None => {
                tracing::warn!("no passage corpus configured; answers will carry no citations");
                StaticRetriever::new(vec![])
            }
        };

        let generator: Arc<dyn Generator> = match &config.generator.endpoint {
            Some(endpoint) => Arc::new(PromptGenerator::new(
                config.generator.model.clone(),
                Arc::new(HttpCompletionTransport::new(endpoint.clone())),
            )),
            None => {
                tracing::info!("no completions endpoint configured; using extractive generator");
                Arc::new(ExtractiveGenerator)
            }
        };

        let pipeline = Arc::new(TrustPipeline::new(
            identity,
            store,
            Arc::new(InverseDistance),
        ));
        let answers = Arc::new(AnswerService::new(
            Arc::new(retriever),
            generator,
            pipeline.clone(),
            config.retrieval.top_k,
        )?);

        let state = AppState::new(pipeline, answers, Arc::new(Redactor::new()));
        Ok(Self { config, state })
    }

    /// Run the server until shutdown.
    pub async fn run(self) -> GatewayResult<()> {
        let addr = self.config.server.listen_addr;
        let app = create_router(self.state, self.config.server.enable_cors);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("trustgate gateway listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| GatewayError::Server(e.to_string()))?;

        tracing::info!("trustgate gateway shutting down");
        Ok(())
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received terminate signal, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn server_builds_from_default_config() {
        let server = Server::new(GatewayConfig::default()).await.unwrap();
        assert_eq!(server.config.server.listen_addr.port(), 8080);
    }

    #[tokio::test]
    async fn server_builds_with_persisted_key() {
        let dir = tempfile::tempdir().unwrap();
        let key_path = dir.path().join("signing.key");

        let mut config = GatewayConfig::default();
        config.signing.key_path = Some(key_path.clone());

        let first = Server::new(config.clone()).await.unwrap();
        let first_key = first.state.pipeline.identity().public_key_hex();

        // A second boot with the same config loads the same key.
        let second = Server::new(config).await.unwrap();
        assert_eq!(second.state.pipeline.identity().public_key_hex(), first_key);
    }
}
