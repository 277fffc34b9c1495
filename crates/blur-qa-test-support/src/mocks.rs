//! Mock implementations of core port traits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use blur_qa_core::domain::{BatchEntry, ImageInfo, ImageRef};
use blur_qa_core::error::AnalysisError;
use blur_qa_core::ports::{ImageLoader, ImageSource, ProgressEvent, ProgressSink, ResultOutput};

/// Mock implementation of `ImageSource` for testing.
///
/// Yields pre-built references and tracks iteration for assertions.
pub struct MockImageSource {
    images: Vec<ImageRef>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    /// Creates a new mock source with the given references.
    #[must_use]
    pub fn new(images: Vec<ImageRef>) -> Self {
        Self {
            images,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = ImageRef> + Send + '_> {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Box::new(self.images.iter().cloned())
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.images.len())
    }
}

/// Mock implementation of `ImageLoader` for testing.
///
/// Returns registered images by url; unknown urls fail to load.
#[derive(Default)]
pub struct MockImageLoader {
    images: HashMap<String, ImageInfo>,
    loads: Mutex<Vec<String>>,
}

impl MockImageLoader {
    /// Creates an empty mock loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an image under `url`.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>, image: ImageInfo) -> Self {
        let url = url.into();
        let image = ImageInfo {
            path: url.clone(),
            ..image
        };
        self.images.insert(url, image);
        self
    }

    /// Returns the urls requested so far, in order.
    #[must_use]
    pub fn loads(&self) -> Vec<String> {
        self.loads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ImageLoader for MockImageLoader {
    fn load(&self, url: &str) -> Result<ImageInfo, AnalysisError> {
        self.loads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
        self.images
            .get(url)
            .cloned()
            .ok_or_else(|| AnalysisError::decode(url, "Failed to load image"))
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures entries for later assertions.
pub struct MockResultOutput {
    entries: Arc<Mutex<Vec<BatchEntry>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured entries.
    #[must_use]
    pub fn entries(&self) -> Vec<BatchEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, entry: &BatchEntry) -> anyhow::Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the number of `Failed` events.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Failed { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { analyzed, failed } => Some((*analyzed, *failed)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
