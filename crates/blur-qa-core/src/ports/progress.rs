//! Progress reporting port for UI integration.

use crate::domain::BatchEntry;

/// Events emitted during batch analysis.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Analysis started for an image.
    Started {
        /// Image id.
        id: String,
        /// Path or URL of the image.
        url: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// Analysis produced a score for an image.
    Completed {
        /// The batch entry.
        entry: BatchEntry,
    },
    /// The image could not be analyzed; an error entry was recorded.
    Failed {
        /// The batch entry carrying the error.
        entry: BatchEntry,
    },
    /// All images have been processed.
    Finished {
        /// Images that received a score.
        analyzed: usize,
        /// Images that failed to load or were too small.
        failed: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
