//! Blur analysis: the sharpness analyzer, quality bands, batch runner and upload gate.

mod batch;
pub mod gate;
mod quality;
mod sharpness;

pub use batch::{analyze_many, BatchAnalyzer, BatchSummary};
pub use gate::{GateDecision, GateOutcome, GateResolution};
pub use quality::{quality_color, quality_meter, quality_text, QualityBand, QualityColor};
pub use sharpness::{
    analyze, grayscale_field, measure_sharpness, SharpnessAnalyzer, SharpnessMeasure,
    MIN_ANALYZABLE_SIDE,
};
