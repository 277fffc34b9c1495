//! Laplacian-variance sharpness analysis.
//!
//! The score is the variance of the 4-neighbour Laplacian over the interior
//! pixels of the BT.601 luminance field. Sharp images have strong local
//! intensity changes and therefore a high variance.
//!
//! The variance is centred on the mean of the *grayscale* field rather than on
//! the mean of the Laplacian. Scores are kept compatible with existing
//! thresholds, so this centring must not be changed to the textbook form.

use image::{DynamicImage, Rgb, Rgba};
use tracing::debug;

use crate::domain::{validate_threshold, AnalysisResult, BlurConfig, ImageInfo};
use crate::error::AnalysisError;

/// ITU-R BT.601 luminance weights.
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Smallest side the 3x3 kernel can be applied to.
pub const MIN_ANALYZABLE_SIDE: u32 = 3;

/// Raw numbers behind a sharpness score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpnessMeasure {
    /// Variance of the Laplacian field around the grayscale mean.
    pub variance: f64,
    /// Mean luminance of the whole image.
    pub mean: f64,
    /// Number of pixels the Laplacian was evaluated at.
    pub interior_pixels: usize,
}

#[inline]
fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * f64::from(r) + LUMA_G * f64::from(g) + LUMA_B * f64::from(b)
}

/// Converts an image to a row-major luminance field.
///
/// Alpha is ignored. Non-8-bit images are converted to 8-bit RGB first.
#[must_use]
pub fn grayscale_field(image: &DynamicImage) -> Vec<f64> {
    match image {
        DynamicImage::ImageRgb8(buf) => buf.pixels().map(|&Rgb([r, g, b])| luma(r, g, b)).collect(),
        DynamicImage::ImageRgba8(buf) => buf
            .pixels()
            .map(|&Rgba([r, g, b, _])| luma(r, g, b))
            .collect(),
        other => other
            .to_rgb8()
            .pixels()
            .map(|&Rgb([r, g, b])| luma(r, g, b))
            .collect(),
    }
}

/// Measures the Laplacian variance of an image.
///
/// # Errors
///
/// Returns `InvalidImage` if either side is shorter than 3 pixels.
#[allow(clippy::cast_precision_loss)]
pub fn measure_sharpness(image: &DynamicImage) -> Result<SharpnessMeasure, AnalysisError> {
    let (width, height) = (image.width(), image.height());
    if width < MIN_ANALYZABLE_SIDE || height < MIN_ANALYZABLE_SIDE {
        return Err(AnalysisError::InvalidImage { width, height });
    }

    let gray = grayscale_field(image);
    let w = width as usize;
    let h = height as usize;

    let mean = gray.iter().sum::<f64>() / gray.len() as f64;

    let mut sum_sq = 0.0;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = y * w + x;
            let laplacian =
                gray[idx] * 4.0 - gray[idx - w] - gray[idx + w] - gray[idx - 1] - gray[idx + 1];
            let d = laplacian - mean;
            sum_sq += d * d;
        }
    }

    let interior_pixels = (w - 2) * (h - 2);
    Ok(SharpnessMeasure {
        variance: sum_sq / interior_pixels as f64,
        mean,
        interior_pixels,
    })
}

/// Analyzes an image against a threshold.
///
/// # Errors
///
/// Returns `InvalidImage` for images smaller than 3x3 and `InvalidThreshold`
/// for a non-positive threshold.
pub fn analyze(image: &DynamicImage, threshold: f64) -> Result<AnalysisResult, AnalysisError> {
    validate_threshold(threshold)?;
    let measure = measure_sharpness(image)?;
    Ok(AnalysisResult::from_variance(measure.variance, threshold))
}

/// Blur analyzer bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct SharpnessAnalyzer {
    config: BlurConfig,
}

impl SharpnessAnalyzer {
    /// Creates an analyzer with the given configuration.
    #[must_use]
    pub const fn new(config: BlurConfig) -> Self {
        Self { config }
    }

    /// Returns the analyzer configuration.
    #[must_use]
    pub const fn config(&self) -> &BlurConfig {
        &self.config
    }

    /// Analyzes a decoded image.
    ///
    /// # Errors
    ///
    /// See [`analyze`].
    pub fn analyze(&self, image: &ImageInfo) -> Result<AnalysisResult, AnalysisError> {
        let result = analyze(&image.image, self.config.threshold)?;
        debug!(
            "{}: blur score {} (threshold {}), {:?}",
            image.path, result.blur_score, result.threshold, result.quality
        );
        Ok(result)
    }

    /// Analyzes a decoded image, reporting failures as an error-quality result.
    #[must_use]
    pub fn assess(&self, image: &ImageInfo) -> AnalysisResult {
        self.analyze(image)
            .unwrap_or_else(|e| self.failure(&e))
    }

    /// Builds the error-quality result for a failure under this configuration.
    #[must_use]
    pub fn failure(&self, error: &AnalysisError) -> AnalysisResult {
        AnalysisResult::failed(self.config.threshold, error)
    }
}
