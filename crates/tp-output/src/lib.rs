//! `tp-output` — local diagnostics for the rust_tp trip planner.
//!
//! | Writer                 | Files created        | Contents                        |
//! |------------------------|----------------------|---------------------------------|
//! | [`CsvIssueWriter`]     | `issues.csv`         | one row per issue, WKT geometry |
//! | [`GeoJsonIssueWriter`] | `issues.geojson`     | `FeatureCollection` of issues   |
//! | [`CsvTraceWriter`]     | `search_trace.csv`   | search events, in order         |
//!
//! Issue writers implement [`IssueWriter`] and are fed by
//! [`IssueSummary::write_to`].  Trace writers implement [`TraceWriter`] and
//! are driven by [`TraceObserver`], which implements
//! `tp_search::SearchObserver`.
//!
//! Everything is written to local files chosen by the caller; nothing is
//! sent over the network.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tp_output::{CsvTraceWriter, IssueSummary, GeoJsonIssueWriter, TraceObserver};
//!
//! let summary = IssueSummary::from_graph(&graph);
//! summary.log_summary();
//! summary.write_to(&mut GeoJsonIssueWriter::new(out_dir))?;
//!
//! let mut obs = TraceObserver::new(CsvTraceWriter::new(out_dir)?);
//! AStar::new(&graph, &request).search_observed(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("trace error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod geojson;
pub mod observer;
pub mod row;
pub mod summary;
pub mod writer;


pub use csv::{CsvIssueWriter, CsvTraceWriter};
pub use error::{OutputError, OutputResult};
pub use geojson::GeoJsonIssueWriter;
pub use observer::TraceObserver;
pub use row::{Issue, TraceRow};
pub use summary::IssueSummary;
pub use writer::{IssueWriter, TraceWriter};
