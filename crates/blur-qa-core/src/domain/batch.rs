//! Batch input and output records.

use serde::{Deserialize, Serialize};

use super::{AnalysisResult, SizeAdvisory};

/// An image to analyze, identified by caller-chosen id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Caller-chosen identifier.
    pub id: String,
    /// Path or URL to load the image from.
    pub url: String,
}

impl ImageRef {
    /// Creates a new image reference.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// Analysis of one batch item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Identifier copied from the input.
    pub id: String,
    /// Source copied from the input.
    pub url: String,
    /// Blur analysis, `Quality::Error` if the image could not be analyzed.
    pub analysis: AnalysisResult,
    /// Size warning, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<SizeAdvisory>,
}

impl BatchEntry {
    /// Pairs an input reference with its analysis.
    #[must_use]
    pub fn new(image: &ImageRef, analysis: AnalysisResult) -> Self {
        Self {
            id: image.id.clone(),
            url: image.url.clone(),
            analysis,
            advisory: None,
        }
    }
}
