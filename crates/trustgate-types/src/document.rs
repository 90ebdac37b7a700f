use serde::{Deserialize, Serialize};

/// Scale convention of a retriever's relevance scores.
///
/// The confidence heuristic assumes distances (smaller = better match). A
/// retriever must declare its scale so the pipeline can refuse backends whose
/// scores would silently invert confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreScale {
    /// Lower score = more relevant (e.g. L2 distance).
    Distance,
    /// Higher score = more relevant (e.g. cosine similarity).
    Similarity,
}

/// One passage produced by the retrieval subsystem for a query.
///
/// Ephemeral input - produced per query, never persisted by this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// Passage text handed to the generator as supporting evidence.
    pub content: String,
    /// Originating source identifier (file name, URL, chunk id).
    pub source_id: String,
    /// Non-negative relevance score on the retriever's declared scale.
    pub relevance_score: f64,
}

impl RetrievedDocument {
    pub fn new(
        content: impl Into<String>,
        source_id: impl Into<String>,
        relevance_score: f64,
    ) -> Self {
        Self {
            content: content.into(),
            source_id: source_id.into(),
            relevance_score,
        }
    }
}
