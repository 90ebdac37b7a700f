/// Absolute floor: confidence is never reported as "no trust at all".
pub const FLOOR_CONFIDENCE: f64 = 0.1;

/// Fixed value for answers produced without grounding evidence.
pub const NO_EVIDENCE_CONFIDENCE: f64 = 0.2;

/// Maps retrieval relevance scores to a bounded trust score.
///
/// Implementations must be pure and deterministic: identical input always
/// yields the identical score, with no side effects.
pub trait ConfidenceStrategy: Send + Sync {
    /// Derive a confidence in `[0.1, 1.0]` from zero or more non-negative
    /// *distance* scores (one per retrieved document actually used).
    fn estimate(&self, scores: &[f64]) -> f64;
}

/// Default policy: linear inverse of the mean distance, floored at 0.1.
///
/// Assumes the distance convention (smaller = better match), so a small mean
/// distance yields confidence approaching 1.0. An empty score list signals an
/// answer with no grounding evidence and gets the fixed fallback 0.2.
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseDistance;

impl ConfidenceStrategy for InverseDistance {
    fn estimate(&self, scores: &[f64]) -> f64 {
        if scores.is_empty() {
            return NO_EVIDENCE_CONFIDENCE;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        (1.0 - mean).max(FLOOR_CONFIDENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_scores_yield_fixed_fallback() {
        assert_eq!(InverseDistance.estimate(&[]), NO_EVIDENCE_CONFIDENCE);
    }

    #[test]
    fn mean_distance_inverts_to_confidence() {
        // mean(0.10, 0.30) = 0.20 -> 1.0 - 0.20 = 0.8
        let confidence = InverseDistance.estimate(&[0.10, 0.30]);
        assert!((confidence - 0.8).abs() < 1e-12);
    }

    #[test]
    fn large_distances_hit_the_floor() {
        assert_eq!(InverseDistance.estimate(&[5.0, 7.0]), FLOOR_CONFIDENCE);
        assert_eq!(InverseDistance.estimate(&[0.95]), FLOOR_CONFIDENCE);
    }

    #[test]
    fn zero_distance_is_full_confidence() {
        assert_eq!(InverseDistance.estimate(&[0.0, 0.0]), 1.0);
    }

    #[test]
    fn estimate_is_deterministic() {
        let scores = [0.11, 0.42, 0.07];
        assert_eq!(
            InverseDistance.estimate(&scores),
            InverseDistance.estimate(&scores)
        );
    }

    proptest! {
        #[test]
        fn confidence_stays_in_bounds(scores in proptest::collection::vec(0.0f64..1e6, 0..32)) {
            let confidence = InverseDistance.estimate(&scores);
            prop_assert!(confidence >= FLOOR_CONFIDENCE);
            prop_assert!(confidence <= 1.0);
        }
    }
}
