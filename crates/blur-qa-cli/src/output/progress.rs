//! Progress reporting on stderr.

use blur_qa_core::{BatchEntry, ProgressEvent, ProgressSink, Quality};
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}";

enum Mode {
    Quiet,
    Bar(IndicatifBar),
    /// One stderr line per flagged image.
    Lines,
}

/// Progress sink for the check command.
pub struct ProgressBar {
    mode: Mode,
}

impl ProgressBar {
    /// Creates a progress reporter.
    ///
    /// `quiet` wins over `show_bar`. Without a bar only blurry and failed
    /// images are reported.
    #[must_use]
    pub fn new(total: Option<u64>, quiet: bool, show_bar: bool) -> Self {
        let mode = if quiet {
            Mode::Quiet
        } else if show_bar {
            let bar = total.map_or_else(IndicatifBar::new_spinner, IndicatifBar::new);
            if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
                bar.set_style(style.progress_chars("#>-"));
            }
            Mode::Bar(bar)
        } else {
            Mode::Lines
        };
        Self { mode }
    }

    fn report_failure(&self, entry: &BatchEntry) {
        let reason = entry.analysis.error.as_deref().unwrap_or("unknown error");
        let line = format!("WARN: Could not analyze {}: {reason}", entry.url);
        match &self.mode {
            Mode::Bar(bar) => bar.println(line),
            Mode::Lines => eprintln!("{line}"),
            Mode::Quiet => {}
        }
    }
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        match (&self.mode, event) {
            (Mode::Quiet, _) => {}
            (Mode::Bar(bar), ProgressEvent::Started { url, total, .. }) => {
                if let Some(total) = total {
                    bar.set_length(total as u64);
                }
                bar.set_message(url);
            }
            (Mode::Bar(bar), ProgressEvent::Completed { .. }) => bar.inc(1),
            (Mode::Bar(bar), ProgressEvent::Failed { entry }) => {
                self.report_failure(&entry);
                bar.inc(1);
            }
            (Mode::Bar(bar), ProgressEvent::Finished { analyzed, failed }) => {
                bar.finish_with_message(format!("{analyzed} analyzed, {failed} failed"));
            }
            (Mode::Lines, ProgressEvent::Completed { entry })
                if entry.analysis.quality == Quality::Blurry =>
            {
                eprintln!(
                    "{}: blurry (score {} < {})",
                    entry.url, entry.analysis.blur_score, entry.analysis.threshold
                );
            }
            (Mode::Lines, ProgressEvent::Failed { entry }) => self.report_failure(&entry),
            (Mode::Lines, _) => {}
        }
    }
}
