//! Scheme-dispatching image loader.

use blur_qa_core::{AnalysisError, ImageInfo, ImageLoader};

use crate::fs::FsImageLoader;
use crate::http::HttpImageLoader;

/// Returns true for `http://` and `https://` urls.
#[must_use]
pub fn is_remote(url: &str) -> bool {
    has_prefix(url, b"http://") || has_prefix(url, b"https://")
}

fn has_prefix(url: &str, prefix: &[u8]) -> bool {
    url.as_bytes()
        .get(..prefix.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(prefix))
}

/// Loads remote urls over HTTP and everything else from the filesystem.
pub struct UrlImageLoader {
    fs: FsImageLoader,
    http: HttpImageLoader,
}

impl UrlImageLoader {
    /// Creates a loader that uses `http` for remote urls.
    #[must_use]
    pub const fn new(http: HttpImageLoader) -> Self {
        Self {
            fs: FsImageLoader,
            http,
        }
    }
}

impl ImageLoader for UrlImageLoader {
    fn load(&self, url: &str) -> Result<ImageInfo, AnalysisError> {
        if is_remote(url) {
            self.http.load(url)
        } else {
            self.fs.load(url)
        }
    }
}
