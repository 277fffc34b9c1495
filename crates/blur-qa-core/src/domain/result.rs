//! Analysis result types.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Overall verdict for an analyzed image.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// Sharpness score at or above the threshold.
    Sharp,
    /// Sharpness score below the threshold.
    Blurry,
    /// The image could not be analyzed.
    Error,
}

/// Blur analysis outcome for a single image.
///
/// `is_blurry` is decided on the unrounded variance; `blur_score` is the
/// rounded value kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Laplacian variance rounded to the nearest integer.
    pub blur_score: u64,
    /// Whether the image is considered blurry.
    pub is_blurry: bool,
    /// Threshold the score was compared against.
    pub threshold: f64,
    /// Overall verdict.
    pub quality: Quality,
    /// Failure message for `Quality::Error` results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// Builds a result from an unrounded variance.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn from_variance(variance: f64, threshold: f64) -> Self {
        let is_blurry = variance < threshold;
        Self {
            // variance is a mean of squares, never negative
            blur_score: variance.round() as u64,
            is_blurry,
            threshold,
            quality: if is_blurry {
                Quality::Blurry
            } else {
                Quality::Sharp
            },
            error: None,
        }
    }

    /// Builds the soft-fail result reported when analysis could not run.
    #[must_use]
    pub fn failed(threshold: f64, error: &AnalysisError) -> Self {
        Self {
            blur_score: 0,
            is_blurry: true,
            threshold,
            quality: Quality::Error,
            error: Some(error.to_string()),
        }
    }

    /// Returns true if this result carries an analysis failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.quality == Quality::Error
    }
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Creates a new dimensions value.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A decoded image ready for analysis.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Path or URL the image was loaded from.
    pub path: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Decoded image data.
    pub image: image::DynamicImage,
}

impl ImageInfo {
    /// Wraps a decoded image, reading its dimensions.
    #[must_use]
    pub fn new(path: impl Into<String>, image: image::DynamicImage) -> Self {
        Self {
            path: path.into(),
            width: image.width(),
            height: image.height(),
            image,
        }
    }

    /// Returns the image dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height)
    }
}

impl std::ops::Deref for ImageInfo {
    type Target = image::DynamicImage;

    fn deref(&self) -> &Self::Target {
        &self.image
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_variance_boundary_is_sharp() {
        let result = AnalysisResult::from_variance(100.0, 100.0);
        assert!(!result.is_blurry);
        assert_eq!(result.quality, Quality::Sharp);
    }

    #[test]
    fn test_blurry_decided_on_unrounded_variance() {
        // rounds up to the threshold but is still below it
        let result = AnalysisResult::from_variance(99.6, 100.0);
        assert_eq!(result.blur_score, 100);
        assert!(result.is_blurry);
        assert_eq!(result.quality, Quality::Blurry);
    }

    #[test]
    fn test_failed_result() {
        let err = AnalysisError::decode("x.jpg", "boom");
        let result = AnalysisResult::failed(50.0, &err);
        assert_eq!(result.blur_score, 0);
        assert!(result.is_blurry);
        assert!(result.is_error());
        assert!((result.threshold - 50.0).abs() < f64::EPSILON);
        assert!(result.error.unwrap().contains("boom"));
    }

    #[test]
    fn test_serialized_field_names() {
        let result = AnalysisResult::from_variance(250.4, 100.0);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["blurScore"], 250);
        assert_eq!(json["isBlurry"], false);
        assert_eq!(json["quality"], "sharp");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_image_info_reads_dimensions() {
        let info = ImageInfo::new("mem", image::DynamicImage::new_rgb8(7, 5));
        assert_eq!(info.dimensions(), ImageDimensions::new(7, 5));
        assert_eq!(info.path, "mem");
    }
}
