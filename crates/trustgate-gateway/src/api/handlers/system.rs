//! Health and key handlers.

use crate::api::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Serialize)]
pub struct KeyResponse {
    pub public_key: String,
    pub key_id: String,
}

/// Current signing public key, for out-of-band distribution to verifiers.
pub async fn signing_key(State(state): State<AppState>) -> Json<KeyResponse> {
    let identity = state.pipeline.identity();
    Json(KeyResponse {
        public_key: identity.public_key_hex(),
        key_id: identity.key_id().to_string(),
    })
}
