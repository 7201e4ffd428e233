//! CSV output backends.
//!
//! - [`CsvIssueWriter`] → `issues.csv`
//! - [`CsvTraceWriter`] → `search_trace.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::{IssueWriter, TraceWriter};
use crate::{Issue, OutputResult, TraceRow};

/// Writes issues as CSV rows, geometry as WKT.
pub struct CsvIssueWriter {
    out:      Writer<File>,
    next_id:  u64,
    finished: bool,
}

impl CsvIssueWriter {
    /// Create `issues.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut out = Writer::from_path(dir.join("issues.csv"))?;
        out.write_record(["id", "kind", "priority", "message", "wkt"])?;
        Ok(Self { out, next_id: 1, finished: false })
    }
}

impl IssueWriter for CsvIssueWriter {
    fn write_issues(&mut self, issues: &[Issue]) -> OutputResult<()> {
        for issue in issues {
            self.out.write_record(&[
                self.next_id.to_string(),
                issue.kind.clone(),
                issue.priority.to_string(),
                issue.message.clone(),
                issue.wkt().unwrap_or_default(),
            ])?;
            self.next_id += 1;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes search trace events as CSV rows.
pub struct CsvTraceWriter {
    out:      Writer<File>,
    finished: bool,
}

impl CsvTraceWriter {
    /// Create `search_trace.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Self::create(&dir.join("search_trace.csv"))
    }

    /// Write to an explicit file path.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let mut out = Writer::from_path(path)?;
        out.write_record(["seq", "event", "state", "vertex", "edge", "elapsed_secs", "weight"])?;
        Ok(Self { out, finished: false })
    }
}

fn id_field(valid: bool, raw: u32) -> String {
    if valid { raw.to_string() } else { String::new() }
}

fn num_field(x: f64) -> String {
    if x.is_nan() { String::new() } else { x.to_string() }
}

impl TraceWriter for CsvTraceWriter {
    fn write_row(&mut self, row: &TraceRow) -> OutputResult<()> {
        self.out.write_record(&[
            row.seq.to_string(),
            row.event.to_owned(),
            id_field(row.state.is_valid(), row.state.0),
            id_field(row.vertex.is_valid(), row.vertex.0),
            id_field(row.edge.is_valid(), row.edge.0),
            num_field(row.elapsed_secs),
            num_field(row.weight),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
