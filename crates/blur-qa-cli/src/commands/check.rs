//! Check command - analyze images for blur.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use blur_qa_adapters::{FsImageSource, HttpImageLoader, UrlImageLoader, DEFAULT_TIMEOUT};
use blur_qa_core::{BatchAnalyzer, BatchSummary, BlurConfig, ImageSource};
use clap::{Args, ValueEnum};
use tracing::{debug, info};

use super::{parse_threshold, ExitCode};
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Shared arguments for image analysis.
#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Files, directories or http(s) urls to analyze
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Laplacian variance below which an image is blurry
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Timeout for downloading remote images, in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        args.threshold = args.threshold.or(config.blur.threshold);
        args.timeout = args.timeout.or(config.loader.timeout_secs);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| OutputFormat::from_str(s, true).ok());
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args.config = Some(config.clone());

        args
    }

    /// Builds the analyzer configuration from merged args and config.
    fn blur_config(&self) -> BlurConfig {
        let defaults = BlurConfig::default();
        let file = self.config.as_ref().map(|c| &c.blur);

        BlurConfig {
            threshold: self.threshold.unwrap_or(defaults.threshold),
            min_image_size: file
                .and_then(|b| b.min_image_size)
                .unwrap_or(defaults.min_image_size),
            max_image_size: file
                .and_then(|b| b.max_image_size)
                .unwrap_or(defaults.max_image_size),
            supported_formats: file
                .and_then(|b| b.supported_formats.clone())
                .map_or(defaults.supported_formats, |formats| {
                    formats.iter().map(|f| f.to_lowercase()).collect()
                }),
        }
    }

    /// Get download timeout with fallback to the adapter default.
    fn timeout(&self) -> Duration {
        self.timeout.map_or(DEFAULT_TIMEOUT, Duration::from_secs)
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Result of running the check command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct CheckResult {
    /// Batch counts.
    pub summary: BatchSummary,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let config = args.blur_config();
    config.validate().context("Invalid blur configuration")?;
    debug!("Blur configuration: {config:?}");

    let source = FsImageSource::new(args.paths.clone(), args.recursive).with_formats(&config);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let loader = UrlImageLoader::new(HttpImageLoader::new(args.timeout())?);
    let output = JsonOutput::stdout(args.format(), args.pretty);

    let summary = BatchAnalyzer::new(config, &loader)
        .with_progress(&progress_bar)
        .analyze_into(&source, &output)?;

    if summary.flagged > 0 && !args.quiet {
        eprintln!(
            "{} image(s) need review: {} blurry, {} failed",
            summary.flagged, summary.blurry, summary.failed
        );
    }

    let exit_code = if summary.flagged > 0 {
        ExitCode::IssuesFound
    } else {
        ExitCode::Success
    };

    Ok(CheckResult { summary, exit_code })
}
