//! Confidence scoring and citation assembly.
//!
//! The confidence heuristic is the single most subjective piece of business
//! logic in the pipeline, so it sits behind [`ConfidenceStrategy`] with one
//! default implementation. Citation assembly is a plain rank-preserving
//! projection.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod citations;
mod confidence;

pub use citations::assemble_citations;
pub use confidence::{ConfidenceStrategy, InverseDistance, FLOOR_CONFIDENCE, NO_EVIDENCE_CONFIDENCE};
