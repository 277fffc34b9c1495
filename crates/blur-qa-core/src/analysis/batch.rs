//! Sequential batch analysis.
//!
//! A failure to load or analyze one image becomes an error entry for that
//! image; the batch always yields one entry per input, in input order.

use tracing::{info, warn};

use super::{gate, SharpnessAnalyzer};
use crate::domain::{BatchEntry, BlurConfig, ImageRef};
use crate::ports::{ImageLoader, ImageSource, ProgressEvent, ProgressSink, ResultOutput};

/// Counts reported at the end of a streamed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Images that received a score.
    pub analyzed: usize,
    /// Images that failed to load or were too small.
    pub failed: usize,
    /// Analyzed images classified as blurry.
    pub blurry: usize,
    /// Entries the upload gate would flag for review.
    pub flagged: usize,
}

impl BatchSummary {
    fn record(&mut self, entry: &BatchEntry) {
        if gate::is_flagged(entry) {
            self.flagged += 1;
        }
        if entry.analysis.is_error() {
            self.failed += 1;
        } else {
            self.analyzed += 1;
            if entry.analysis.is_blurry {
                self.blurry += 1;
            }
        }
    }
}

/// Runs blur analysis over many images.
pub struct BatchAnalyzer<'a> {
    analyzer: SharpnessAnalyzer,
    loader: &'a dyn ImageLoader,
    progress: Option<&'a dyn ProgressSink>,
}

impl<'a> BatchAnalyzer<'a> {
    /// Creates a batch analyzer that decodes through `loader`.
    #[must_use]
    pub fn new(config: BlurConfig, loader: &'a dyn ImageLoader) -> Self {
        Self {
            analyzer: SharpnessAnalyzer::new(config),
            loader,
            progress: None,
        }
    }

    /// Reports progress events to `sink`.
    #[must_use]
    pub fn with_progress(mut self, sink: &'a dyn ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Analyzes a single image reference, never failing.
    #[must_use]
    pub fn analyze_one(&self, image: &ImageRef) -> BatchEntry {
        let config = self.analyzer.config();
        match self.loader.load(&image.url) {
            Ok(decoded) => {
                let mut entry = BatchEntry::new(image, self.analyzer.assess(&decoded));
                entry.advisory = config.size_advisory(decoded.width, decoded.height);
                if let Some(advisory) = entry.advisory {
                    info!("{}: {advisory}", image.url);
                }
                entry
            }
            Err(e) => {
                warn!("Failed to load {}: {e}", image.url);
                BatchEntry::new(image, self.analyzer.failure(&e))
            }
        }
    }

    /// Analyzes all images in order and returns one entry per input.
    #[must_use]
    pub fn analyze_many(&self, images: &[ImageRef]) -> Vec<BatchEntry> {
        let total = Some(images.len());
        let mut summary = BatchSummary::default();
        let entries = images
            .iter()
            .enumerate()
            .map(|(index, image)| {
                let entry = self.step(index, total, image);
                summary.record(&entry);
                entry
            })
            .collect();
        self.emit(ProgressEvent::Finished {
            analyzed: summary.analyzed,
            failed: summary.failed,
        });
        entries
    }

    /// Analyzes every image from `source`, writing each entry as it completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the output fails; analysis failures do not abort.
    pub fn analyze_into(
        &self,
        source: &dyn ImageSource,
        output: &dyn ResultOutput,
    ) -> anyhow::Result<BatchSummary> {
        let total = source.count_hint();
        let mut summary = BatchSummary::default();

        for (index, image) in source.images().enumerate() {
            let entry = self.step(index, total, &image);
            summary.record(&entry);
            output.write(&entry)?;
        }
        output.flush()?;

        self.emit(ProgressEvent::Finished {
            analyzed: summary.analyzed,
            failed: summary.failed,
        });
        Ok(summary)
    }

    fn step(&self, index: usize, total: Option<usize>, image: &ImageRef) -> BatchEntry {
        self.emit(ProgressEvent::Started {
            id: image.id.clone(),
            url: image.url.clone(),
            index,
            total,
        });
        let entry = self.analyze_one(image);
        if self.progress.is_some() {
            let event = if entry.analysis.is_error() {
                ProgressEvent::Failed {
                    entry: entry.clone(),
                }
            } else {
                ProgressEvent::Completed {
                    entry: entry.clone(),
                }
            };
            self.emit(event);
        }
        entry
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(sink) = self.progress {
            sink.on_event(event);
        }
    }
}

/// Analyzes a list of images with the default configuration and a custom threshold.
#[must_use]
pub fn analyze_many(
    images: &[ImageRef],
    threshold: f64,
    loader: &dyn ImageLoader,
) -> Vec<BatchEntry> {
    BatchAnalyzer::new(BlurConfig::with_threshold(threshold), loader).analyze_many(images)
}
