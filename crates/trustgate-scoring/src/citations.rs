use trustgate_types::{Citation, RetrievedDocument};

/// Project ranked documents into an ordered citation list.
///
/// Rank order is preserved exactly (most-relevant first, as produced by the
/// retriever). Repeated `source_id`s are not deduplicated - each chunk is
/// independent evidence. Scores are carried at full precision.
pub fn assemble_citations(documents: &[RetrievedDocument]) -> Vec<Citation> {
    documents
        .iter()
        .map(|doc| Citation::new(doc.source_id.clone(), doc.relevance_score))
        .collect()
}
