//! Image loader port: the decode boundary.

use crate::domain::ImageInfo;
use crate::error::AnalysisError;

/// Port for turning a path or URL into decoded pixels.
///
/// Loading is the only step of an analysis that may block on I/O; everything
/// after it is pure computation over the returned buffer.
pub trait ImageLoader: Send + Sync {
    /// Loads and decodes the image at `url`.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Decode` if the image cannot be fetched or decoded.
    fn load(&self, url: &str) -> Result<ImageInfo, AnalysisError>;
}
