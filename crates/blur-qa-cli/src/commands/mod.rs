//! CLI command definitions and handlers.

pub mod band;
pub mod check;

use clap::{Parser, Subcommand};

/// Blur QA - Laplacian-variance blur detection for photo uploads
#[derive(Parser)]
#[command(name = "blur-qa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared check arguments (paths, threshold, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze images for blur
    Check(check::CheckArgs),
    /// Show the quality band of a blur score
    Band(band::BandArgs),
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image is sharp.
    Success,
    /// At least one image is blurry or failed to analyze.
    IssuesFound,
    /// The command could not run.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::SUCCESS,
            ExitCode::IssuesFound => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}

/// Parse and validate a threshold value (positive number).
pub fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} is not a positive number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("100"), Ok(100.0));
        assert_eq!(parse_threshold("0.5"), Ok(0.5));
        assert!(parse_threshold("0").is_err());
        assert!(parse_threshold("-1").is_err());
        assert!(parse_threshold("inf").is_err());
        assert!(parse_threshold("abc").unwrap_err().contains("not a valid number"));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
