//! Core domain types for blur analysis.

mod batch;
mod config;
mod result;

pub use batch::{BatchEntry, ImageRef};
pub use config::{
    validate_threshold, BlurConfig, SizeAdvisory, DEFAULT_MAX_IMAGE_SIZE, DEFAULT_MIN_IMAGE_SIZE,
    DEFAULT_SUPPORTED_FORMATS, DEFAULT_THRESHOLD,
};
pub use result::{AnalysisResult, ImageDimensions, ImageInfo, Quality};
