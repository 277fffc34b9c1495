//! Band command - map a blur score to its quality band.

use anyhow::Result;
use blur_qa_core::domain::DEFAULT_THRESHOLD;
use blur_qa_core::{quality_meter, QualityBand};
use clap::Args;
use serde::Serialize;

use super::parse_threshold;

/// Arguments for the band command
#[derive(Args)]
pub struct BandArgs {
    /// Blur score to classify
    pub score: f64,

    /// Blur threshold the score is relative to
    #[arg(long, value_parser = parse_threshold, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Print the band as JSON
    #[arg(long)]
    pub json: bool,
}

/// Quality band description of a score.
#[derive(Debug, Serialize)]
pub struct BandReport {
    /// Band the score falls in.
    pub band: QualityBand,
    /// Short label.
    pub text: &'static str,
    /// Label with a suggestion for the uploader.
    pub advice: &'static str,
    /// Display colour identifier.
    pub color: &'static str,
    /// Quality meter fill, 0-100.
    pub meter: u8,
}

impl BandReport {
    /// Describes `score` relative to `threshold`.
    #[must_use]
    pub fn new(score: f64, threshold: f64) -> Self {
        let band = QualityBand::classify(score, threshold);
        Self {
            band,
            text: band.text(),
            advice: band.advice(),
            color: band.color().as_str(),
            meter: quality_meter(score, threshold),
        }
    }
}

/// Run the band command.
pub fn run(args: &BandArgs) -> Result<()> {
    let report = BandReport::new(args.score, args.threshold);
    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{} ({}, {}%)", report.advice, report.color, report.meter);
    }
    Ok(())
}
