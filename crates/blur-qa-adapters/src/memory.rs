//! In-memory image loader for already-received uploads.

use std::collections::HashMap;

use blur_qa_core::{AnalysisError, ImageInfo, ImageLoader};

/// Decodes encoded image bytes registered under a key.
#[derive(Debug, Default, Clone)]
pub struct MemoryImageLoader {
    buffers: HashMap<String, Vec<u8>>,
}

impl MemoryImageLoader {
    /// Creates an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers encoded bytes (JPEG, PNG, ...) under `key`.
    pub fn insert(&mut self, key: impl Into<String>, bytes: Vec<u8>) {
        self.buffers.insert(key.into(), bytes);
    }

    /// Returns the number of registered buffers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns true if no buffer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

impl ImageLoader for MemoryImageLoader {
    fn load(&self, url: &str) -> Result<ImageInfo, AnalysisError> {
        let bytes = self
            .buffers
            .get(url)
            .ok_or_else(|| AnalysisError::decode(url, "no such buffer"))?;
        let image = image::load_from_memory(bytes).map_err(|e| AnalysisError::decode(url, e))?;
        Ok(ImageInfo::new(url, image))
    }
}
