//! Error types for sharpness analysis.

use thiserror::Error;

/// Failures that affect a single image's analysis.
///
/// These are the only errors the soft-fail paths convert into
/// [`Quality::Error`](crate::Quality::Error) results; everything else propagates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The image has no interior pixels for the Laplacian kernel.
    #[error("image too small for analysis: {width}x{height} (need at least 3x3)")]
    InvalidImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// The image could not be loaded or decoded.
    #[error("failed to load image {url}: {reason}")]
    Decode {
        /// Source the image was requested from.
        url: String,
        /// Underlying loader or decoder message.
        reason: String,
    },

    /// The threshold is zero, negative, or not finite.
    #[error("threshold must be a positive number, got {0}")]
    InvalidThreshold(f64),
}

impl AnalysisError {
    /// Builds a decode error from any displayable cause.
    pub fn decode(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Decode {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
