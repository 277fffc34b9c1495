//! Blur QA Core - Domain logic for image sharpness assessment
//!
//! This crate contains the domain types, the Laplacian-variance sharpness
//! analyzer, quality band mapping, batch analysis and the upload gate, plus
//! the port traits adapters implement.

pub mod analysis;
pub mod domain;
pub mod error;
pub mod ports;

pub use analysis::{
    analyze, analyze_many, quality_color, quality_meter, quality_text, BatchAnalyzer,
    BatchSummary, GateDecision, GateOutcome, GateResolution, QualityBand, QualityColor,
    SharpnessAnalyzer, SharpnessMeasure,
};
pub use domain::{
    AnalysisResult, BatchEntry, BlurConfig, ImageDimensions, ImageInfo, ImageRef, Quality,
    SizeAdvisory,
};
pub use error::AnalysisError;
pub use ports::{ImageLoader, ImageSource, ProgressEvent, ProgressSink, ResultOutput};
