//! Mapping of blur scores to user-facing quality bands.

use serde::{Deserialize, Serialize};

/// Quality band of a blur score relative to its threshold.
///
/// Bands are `[0, t/2)`, `[t/2, t)`, `[t, 1.5t)` and `[1.5t, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityBand {
    /// Below half the threshold.
    VeryBlurry,
    /// Below the threshold.
    SomewhatBlurry,
    /// Up to one and a half times the threshold.
    Good,
    /// Everything sharper.
    Excellent,
}

/// Display colour of a quality band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualityColor {
    /// Very blurry.
    Red,
    /// Somewhat blurry.
    Yellow,
    /// Good.
    Green,
    /// Excellent.
    DarkGreen,
}

impl QualityColor {
    /// Stable identifier for the colour.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::DarkGreen => "dark-green",
        }
    }
}

impl std::fmt::Display for QualityColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl QualityBand {
    /// Classifies a score against a threshold.
    #[must_use]
    pub fn classify(score: f64, threshold: f64) -> Self {
        if score < threshold * 0.5 {
            Self::VeryBlurry
        } else if score < threshold {
            Self::SomewhatBlurry
        } else if score < threshold * 1.5 {
            Self::Good
        } else {
            Self::Excellent
        }
    }

    /// Short label for the band.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::VeryBlurry => "Very blurry",
            Self::SomewhatBlurry => "Somewhat blurry",
            Self::Good => "Good quality",
            Self::Excellent => "Excellent quality",
        }
    }

    /// Label with a suggestion for the uploader.
    #[must_use]
    pub const fn advice(self) -> &'static str {
        match self {
            Self::VeryBlurry => "Very blurry - Please upload a clearer image",
            Self::SomewhatBlurry => "Somewhat blurry - Consider uploading a sharper image",
            Self::Good => "Good quality",
            Self::Excellent => "Excellent quality",
        }
    }

    /// Colour used to render the band.
    #[must_use]
    pub const fn color(self) -> QualityColor {
        match self {
            Self::VeryBlurry => QualityColor::Red,
            Self::SomewhatBlurry => QualityColor::Yellow,
            Self::Good => QualityColor::Green,
            Self::Excellent => QualityColor::DarkGreen,
        }
    }
}

/// Returns the quality label for a score.
#[must_use]
pub fn quality_text(score: f64, threshold: f64) -> &'static str {
    QualityBand::classify(score, threshold).text()
}

/// Returns the quality colour for a score.
#[must_use]
pub fn quality_color(score: f64, threshold: f64) -> QualityColor {
    QualityBand::classify(score, threshold).color()
}

/// Fill percentage of a quality meter, where twice the threshold is full.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn quality_meter(score: f64, threshold: f64) -> u8 {
    let percent = (score / (threshold * 2.0) * 100.0).round();
    if percent.is_nan() {
        return 0;
    }
    // clamped to 0..=100 before the cast
    percent.clamp(0.0, 100.0) as u8
}
