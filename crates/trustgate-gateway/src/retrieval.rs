//! Bundled passage retriever.
//!
//! A deterministic in-process retriever over a configured passage corpus.
//! Scores are token-overlap distances (1 - Jaccard overlap), so they follow
//! the distance convention the confidence policy requires: 0.0 is a perfect
//! match, 1.0 shares no tokens with the query. Production deployments swap
//! in a real vector index behind the same `Retriever` trait.

use crate::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;
use trustgate_pipeline::{CollaboratorError, Retriever};
use trustgate_types::{RetrievedDocument, ScoreScale};

/// One corpus passage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    pub content: String,
    pub source_id: String,
}

/// Deterministic token-overlap retriever.
pub struct StaticRetriever {
    passages: Vec<Passage>,
}

impl StaticRetriever {
    pub fn new(passages: Vec<Passage>) -> Self {
        Self { passages }
    }

    /// Load the passage corpus from a JSON array file.
    pub fn from_json_file(path: &Path) -> GatewayResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let passages: Vec<Passage> = serde_json::from_str(&contents).map_err(|e| {
            GatewayError::Config(format!("passage file {}: {e}", path.display()))
        })?;
        tracing::info!(passages = passages.len(), path = %path.display(), "loaded passage corpus");
        Ok(Self::new(passages))
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

#[async_trait]
impl Retriever for StaticRetriever {
    fn score_scale(&self) -> ScoreScale {
        ScoreScale::Distance
    }

    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, CollaboratorError> {
        let query_tokens = tokenize(query);

        let mut scored: Vec<RetrievedDocument> = self
            .passages
            .iter()
            .map(|passage| {
                RetrievedDocument::new(
                    passage.content.clone(),
                    passage.source_id.clone(),
                    overlap_distance(&query_tokens, &tokenize(&passage.content)),
                )
            })
            .collect();

        scored.sort_by(|a, b| {
            a.relevance_score
                .partial_cmp(&b.relevance_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.source_id.cmp(&b.source_id))
        });
        scored.truncate(top_k);
        Ok(scored)
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn overlap_distance(query: &HashSet<String>, passage: &HashSet<String>) -> f64 {
    if query.is_empty() || passage.is_empty() {
        return 1.0;
    }
    let intersection = query.intersection(passage).count();
    let union = query.union(passage).count();
    1.0 - intersection as f64 / union as f64
}
