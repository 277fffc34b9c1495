//! Filesystem adapters for listing and loading images.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use blur_qa_core::{AnalysisError, BlurConfig, ImageInfo, ImageLoader, ImageRef, ImageSource};
use tracing::{debug, warn};

use crate::url::is_remote;

/// Prefix stripped from `file://` urls.
const FILE_SCHEME: &str = "file://";

/// Filesystem image source adapter.
///
/// Expands files and directories into image references. Remote urls are
/// passed through untouched so they can be mixed with local paths.
/// The filesystem is scanned once; later calls reuse the listing.
pub struct FsImageSource {
    paths: Vec<PathBuf>,
    recursive: bool,
    formats: Vec<String>,
    scanned: OnceLock<Vec<ImageRef>>,
}

impl FsImageSource {
    /// Creates a new filesystem image source accepting the default formats.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files, directories or urls to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self {
            paths,
            recursive,
            formats: BlurConfig::default().supported_formats,
            scanned: OnceLock::new(),
        }
    }

    /// Restricts the source to the formats accepted by `config`.
    #[must_use]
    pub fn with_formats(mut self, config: &BlurConfig) -> Self {
        self.formats.clone_from(&config.supported_formats);
        self.scanned = OnceLock::new();
        self
    }

    /// Collects all image references from the configured paths.
    ///
    /// Ids are the position in the resulting list.
    fn collect(&self) -> Vec<ImageRef> {
        let mut files = Vec::new();

        for path in &self.paths {
            let display = path.to_string_lossy();
            if is_remote(&display) {
                files.push(display.into_owned());
            } else if path.is_file() {
                if self.is_supported(path) {
                    files.push(display.into_owned());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else if self.is_supported(path) {
                // kept so the loader reports it as a failed entry
                warn!("Path does not exist: {}", path.display());
                files.push(display.into_owned());
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
            .into_iter()
            .enumerate()
            .map(|(i, url)| ImageRef::new(i.to_string(), url))
            .collect()
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<String>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
        paths.sort();

        for path in paths {
            if path.is_file() && self.is_supported(&path) {
                files.push(path.to_string_lossy().into_owned());
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }

    fn scan(&self) -> &[ImageRef] {
        self.scanned.get_or_init(|| {
            let images = self.collect();
            debug!("Found {} images", images.len());
            images
        })
    }

    /// Checks if a path has an accepted image extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .is_some_and(|e| self.formats.iter().any(|f| *f == e))
    }
}

impl ImageSource for FsImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = ImageRef> + Send + '_> {
        Box::new(self.scan().iter().cloned())
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.scan().len())
    }
}

/// Loads images from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&self, url: &str) -> Result<ImageInfo, AnalysisError> {
        let path = url.strip_prefix(FILE_SCHEME).unwrap_or(url);
        let image = image::open(path).map_err(|e| AnalysisError::decode(url, e))?;
        Ok(ImageInfo::new(url, image))
    }
}
