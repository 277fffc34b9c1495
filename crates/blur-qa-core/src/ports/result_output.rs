//! Result output port for writing batch entries.

use crate::domain::BatchEntry;

/// Port for outputting analysis results.
pub trait ResultOutput: Send + Sync {
    /// Writes a single batch entry.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, entry: &BatchEntry) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
