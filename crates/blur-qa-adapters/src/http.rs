//! HTTP image loader.

use std::time::Duration;

use anyhow::{Context, Result};
use blur_qa_core::{AnalysisError, ImageInfo, ImageLoader};
use tracing::debug;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads and decodes images over HTTP(S).
pub struct HttpImageLoader {
    client: reqwest::blocking::Client,
}

impl HttpImageLoader {
    /// Creates a loader whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("blur-qa/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl ImageLoader for HttpImageLoader {
    fn load(&self, url: &str) -> Result<ImageInfo, AnalysisError> {
        debug!("Downloading {url}");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AnalysisError::decode(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::decode(
                url,
                format!("request failed with status {status}"),
            ));
        }

        let bytes = response
            .bytes()
            .map_err(|e| AnalysisError::decode(url, e))?;
        let image = image::load_from_memory(&bytes).map_err(|e| AnalysisError::decode(url, e))?;

        debug!("Decoded {url} ({} bytes)", bytes.len());
        Ok(ImageInfo::new(url, image))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_host_is_decode_error() {
        let loader = HttpImageLoader::new(Duration::from_millis(200)).unwrap();
        // port 9 on loopback (discard) is closed on test machines
        let err = loader.load("http://127.0.0.1:9/photo.jpg").unwrap_err();
        assert!(matches!(err, AnalysisError::Decode { .. }));
        assert!(err.to_string().contains("http://127.0.0.1:9/photo.jpg"));
    }
}
