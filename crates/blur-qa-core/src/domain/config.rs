//! Analyzer configuration.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Default blur threshold for the Laplacian variance.
pub const DEFAULT_THRESHOLD: f64 = 100.0;
/// Advisory minimum image side, in pixels.
pub const DEFAULT_MIN_IMAGE_SIZE: u32 = 100;
/// Advisory maximum image side, in pixels.
pub const DEFAULT_MAX_IMAGE_SIZE: u32 = 4000;
/// Formats accepted for upload by default.
pub const DEFAULT_SUPPORTED_FORMATS: &[&str] = &["jpeg", "jpg", "png", "webp"];

/// Configuration for blur analysis.
///
/// Passed explicitly to the analyzer and batch runner so callers can vary
/// thresholds and format lists without shared state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlurConfig {
    /// Variance below this value is classified as blurry.
    pub threshold: f64,
    /// Images with a side shorter than this get a `TooSmall` advisory.
    pub min_image_size: u32,
    /// Images with a side longer than this get a `TooLarge` advisory.
    pub max_image_size: u32,
    /// Lowercase file extensions accepted as input.
    pub supported_formats: Vec<String>,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_image_size: DEFAULT_MIN_IMAGE_SIZE,
            max_image_size: DEFAULT_MAX_IMAGE_SIZE,
            supported_formats: DEFAULT_SUPPORTED_FORMATS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl BlurConfig {
    /// Returns the default configuration with a different threshold.
    #[must_use]
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Checks that the threshold is usable and the size bounds are ordered.
    ///
    /// # Errors
    ///
    /// Returns `InvalidThreshold` for a non-positive or non-finite threshold.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        validate_threshold(self.threshold)?;
        if self.min_image_size > self.max_image_size {
            tracing::warn!(
                "min_image_size {} exceeds max_image_size {}, size advisories will always fire",
                self.min_image_size,
                self.max_image_size
            );
        }
        Ok(())
    }

    /// Returns true if the extension (without dot, any case) is accepted.
    #[must_use]
    pub fn supports_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.supported_formats.iter().any(|f| *f == ext)
    }

    /// Returns an advisory when the image falls outside the recommended size.
    ///
    /// Advisories never block analysis.
    #[must_use]
    pub const fn size_advisory(&self, width: u32, height: u32) -> Option<SizeAdvisory> {
        if width < self.min_image_size || height < self.min_image_size {
            Some(SizeAdvisory::TooSmall {
                min: self.min_image_size,
            })
        } else if width > self.max_image_size || height > self.max_image_size {
            Some(SizeAdvisory::TooLarge {
                max: self.max_image_size,
            })
        } else {
            None
        }
    }
}

/// Rejects thresholds that cannot produce a meaningful classification.
///
/// # Errors
///
/// Returns `InvalidThreshold` unless `threshold` is finite and positive.
pub fn validate_threshold(threshold: f64) -> Result<(), AnalysisError> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidThreshold(threshold))
    }
}

/// Non-blocking warning about image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SizeAdvisory {
    /// At least one side is below the recommended minimum.
    TooSmall {
        /// Recommended minimum side in pixels.
        min: u32,
    },
    /// At least one side is above the recommended maximum.
    TooLarge {
        /// Recommended maximum side in pixels.
        max: u32,
    },
}

impl std::fmt::Display for SizeAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooSmall { min } => write!(f, "image is smaller than the recommended {min}px"),
            Self::TooLarge { max } => write!(f, "image is larger than the recommended {max}px"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BlurConfig::default();
        assert!((config.threshold - 100.0).abs() < f64::EPSILON);
        assert_eq!(config.min_image_size, 100);
        assert_eq!(config.max_image_size, 4000);
        assert_eq!(config.supported_formats, ["jpeg", "jpg", "png", "webp"]);
    }

    #[test]
    fn test_supports_extension_case_insensitive() {
        let config = BlurConfig::default();
        assert!(config.supports_extension("JPG"));
        assert!(config.supports_extension("webp"));
        assert!(!config.supports_extension("gif"));
    }

    #[test]
    fn test_custom_formats_do_not_leak() {
        let mut config = BlurConfig::default();
        config.supported_formats = vec!["tiff".into()];
        assert!(config.supports_extension("tiff"));
        assert!(BlurConfig::default().supports_extension("png"));
        assert!(!BlurConfig::default().supports_extension("tiff"));
    }

    #[test]
    fn test_size_advisory() {
        let config = BlurConfig::default();
        assert_eq!(
            config.size_advisory(99, 500),
            Some(SizeAdvisory::TooSmall { min: 100 })
        );
        assert_eq!(
            config.size_advisory(4001, 500),
            Some(SizeAdvisory::TooLarge { max: 4000 })
        );
        assert_eq!(config.size_advisory(100, 4000), None);
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(0.5).is_ok());
        assert_eq!(
            validate_threshold(0.0),
            Err(AnalysisError::InvalidThreshold(0.0))
        );
        assert!(validate_threshold(-3.0).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
        assert!(validate_threshold(f64::INFINITY).is_err());
        assert!(BlurConfig::with_threshold(-1.0).validate().is_err());
    }
}
