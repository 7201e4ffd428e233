//! Writer traits implemented by the output backends.

use crate::{Issue, OutputResult, TraceRow};

/// Sink for [`Issue`] records (CSV, GeoJSON…).
pub trait IssueWriter {
    fn write_issues(&mut self, issues: &[Issue]) -> OutputResult<()>;

    /// Flush and close the underlying file.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Sink for search trace events.
pub trait TraceWriter {
    fn write_row(&mut self, row: &TraceRow) -> OutputResult<()>;

    /// Flush and close the underlying file.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
