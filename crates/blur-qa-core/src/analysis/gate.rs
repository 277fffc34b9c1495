//! Upload gate: decide what to do with blurry images before accepting a batch.

use serde::{Deserialize, Serialize};

use crate::domain::BatchEntry;

/// Result of reviewing a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GateOutcome {
    /// No image needs attention.
    Clear,
    /// Some images are blurry or could not be analyzed.
    NeedsReview {
        /// Ids of the flagged images, in batch order.
        flagged: Vec<String>,
    },
}

impl GateOutcome {
    /// Returns true if the batch can be accepted without asking the user.
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }
}

/// The uploader's answer to a review prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    /// Drop flagged images and continue with the rest.
    RemoveBlurry,
    /// Accept every image as is.
    KeepAnyway,
    /// Keep the clear images and ask for new captures of the flagged ones.
    Retake,
}

/// What remains of a batch after a decision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GateResolution {
    /// Entries accepted for upload.
    pub kept: Vec<BatchEntry>,
    /// Entries dropped from the upload.
    pub removed: Vec<BatchEntry>,
    /// Ids the uploader should capture again.
    pub retake: Vec<String>,
}

/// Returns true if an entry needs the uploader's attention.
///
/// Error entries are flagged as well since they report `is_blurry`.
#[must_use]
pub const fn is_flagged(entry: &BatchEntry) -> bool {
    entry.analysis.is_blurry
}

/// Reviews a batch.
#[must_use]
pub fn review(entries: &[BatchEntry]) -> GateOutcome {
    let flagged: Vec<String> = entries
        .iter()
        .filter(|e| is_flagged(e))
        .map(|e| e.id.clone())
        .collect();
    if flagged.is_empty() {
        GateOutcome::Clear
    } else {
        GateOutcome::NeedsReview { flagged }
    }
}

/// Applies the uploader's decision to a batch.
#[must_use]
pub fn resolve(entries: Vec<BatchEntry>, decision: GateDecision) -> GateResolution {
    if decision == GateDecision::KeepAnyway {
        return GateResolution {
            kept: entries,
            ..GateResolution::default()
        };
    }

    let (removed, kept): (Vec<_>, Vec<_>) = entries.into_iter().partition(is_flagged);
    let retake = if decision == GateDecision::Retake {
        removed.iter().map(|e| e.id.clone()).collect()
    } else {
        Vec::new()
    };

    GateResolution {
        kept,
        removed,
        retake,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisResult, ImageRef};
    use crate::error::AnalysisError;

    fn entry(id: &str, variance: f64) -> BatchEntry {
        BatchEntry::new(
            &ImageRef::new(id, format!("{id}.jpg")),
            AnalysisResult::from_variance(variance, 100.0),
        )
    }

    fn failed(id: &str) -> BatchEntry {
        BatchEntry::new(
            &ImageRef::new(id, format!("{id}.jpg")),
            AnalysisResult::failed(100.0, &AnalysisError::decode(id, "bad data")),
        )
    }

    fn ids(entries: &[BatchEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_review_clear() {
        let outcome = review(&[entry("a", 300.0), entry("b", 100.0)]);
        assert!(outcome.is_clear());
        assert!(review(&[]).is_clear());
    }

    #[test]
    fn test_review_flags_blurry_and_errors() {
        let outcome = review(&[entry("a", 300.0), entry("b", 20.0), failed("c")]);
        assert_eq!(
            outcome,
            GateOutcome::NeedsReview {
                flagged: vec!["b".into(), "c".into()]
            }
        );
    }

    #[test]
    fn test_remove_blurry() {
        let batch = vec![entry("a", 20.0), entry("b", 300.0), failed("c")];
        let resolution = resolve(batch, GateDecision::RemoveBlurry);
        assert_eq!(ids(&resolution.kept), ["b"]);
        assert_eq!(ids(&resolution.removed), ["a", "c"]);
        assert!(resolution.retake.is_empty());
    }

    #[test]
    fn test_keep_anyway() {
        let batch = vec![entry("a", 20.0), entry("b", 300.0)];
        let resolution = resolve(batch, GateDecision::KeepAnyway);
        assert_eq!(ids(&resolution.kept), ["a", "b"]);
        assert!(resolution.removed.is_empty());
    }

    #[test]
    fn test_retake_lists_flagged_ids() {
        let batch = vec![entry("a", 20.0), entry("b", 300.0), entry("c", 60.0)];
        let resolution = resolve(batch, GateDecision::Retake);
        assert_eq!(ids(&resolution.kept), ["b"]);
        assert_eq!(resolution.retake, ["a", "c"]);
    }
}
