//! JSON output adapter.

use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use blur_qa_core::{AnalysisResult, BatchEntry, ResultOutput, SizeAdvisory};
use serde::Serialize;
use tracing::debug;

use crate::commands::band::BandReport;
use crate::commands::check::OutputFormat;

/// One output record per analyzed image.
#[derive(Debug, Serialize)]
pub struct Record<'a> {
    /// Image id.
    pub id: &'a str,
    /// Path or URL of the image.
    pub url: &'a str,
    /// Time of analysis (RFC 3339).
    pub timestamp: String,
    /// Blur analysis.
    pub analysis: &'a AnalysisResult,
    /// Quality band, absent for failed images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<BandReport>,
    /// Size warning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<&'a SizeAdvisory>,
}

impl<'a> Record<'a> {
    /// Builds the record for a batch entry.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(entry: &'a BatchEntry) -> Self {
        let analysis = &entry.analysis;
        let band = (!analysis.is_error())
            .then(|| BandReport::new(analysis.blur_score as f64, analysis.threshold));
        Self {
            id: &entry.id,
            url: &entry.url,
            timestamp: iso_timestamp(),
            analysis,
            band,
            advisory: entry.advisory.as_ref(),
        }
    }
}

/// JSON / JSON Lines output adapter.
///
/// JSONL writes each record immediately; JSON buffers serialized records and
/// writes a single array on `flush`.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    format: OutputFormat,
    pretty: bool,
    buffered: Mutex<Vec<serde_json::Value>>,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout(format: OutputFormat, pretty: bool) -> Self {
        Self::new(Box::new(io::stdout()), format, pretty)
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
            pretty,
            buffered: Mutex::new(Vec::new()),
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn write_line(&self, json: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl ResultOutput for JsonOutput {
    fn write(&self, entry: &BatchEntry) -> Result<()> {
        let record = Record::new(entry);
        match self.format {
            OutputFormat::Jsonl => self.write_line(&serde_json::to_string(&record)?),
            OutputFormat::Json => {
                let value = serde_json::to_value(&record)?;
                self.buffered
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
                    .push(value);
                Ok(())
            }
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        if self.format == OutputFormat::Json {
            let records = std::mem::take(
                &mut *self
                    .buffered
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?,
            );
            let json = if self.pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            self.write_line(&json)?;
        }

        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
