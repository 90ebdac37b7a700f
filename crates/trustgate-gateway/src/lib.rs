//! TrustGate HTTP gateway.
//!
//! Hosts the trust envelope pipeline behind a small REST surface:
//! - `POST /api/v1/chat` - answer a question and return a signed envelope
//! - `GET  /api/v1/audit/:audit_id` - fetch the permanent audit record
//! - `POST /api/v1/verify` - check a signature against envelope fields
//! - `GET  /api/v1/key` - current public key and key id
//! - `GET  /health` - liveness
//!
//! The gateway also owns the pieces the core treats as collaborators: query
//! redaction, a passage retriever and an answer generator.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod api;
pub mod config;
pub mod error;
pub mod generate;
pub mod retrieval;
pub mod server;

pub use config::GatewayConfig;
pub use error::{ApiError, ApiResult, GatewayError, GatewayResult};
pub use server::Server;
