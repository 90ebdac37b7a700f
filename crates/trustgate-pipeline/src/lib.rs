//! The trust envelope pipeline.
//!
//! Composes the confidence estimator, citation assembler, canonical signer
//! and audit store into the three transport-facing operations: submit an
//! answer for enveloping, look up an audit record, and check a signature.
//! Retrieval and generation stay behind narrow collaborator traits - the
//! pipeline never inspects how documents or answers were produced.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod builder;
mod collaborators;
mod error;
mod pipeline;

pub use builder::EnvelopeBuilder;
pub use collaborators::{CollaboratorError, Generator, Retriever};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{AnswerService, TrustPipeline};
