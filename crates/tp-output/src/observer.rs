//! `TraceObserver<W>`: bridges `SearchObserver` to a `TraceWriter`.

use tp_core::{EdgeId, StateId, VertexId};
use tp_search::{RejectReason, SearchObserver, SearchState, SearchStats};

use crate::row::TraceRow;
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// A [`SearchObserver`] that records state creation, expansion and edge
/// rejection events to any [`TraceWriter`] backend.
///
/// Errors from the writer are stored internally because `SearchObserver`
/// methods have no return value.  After the search returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct TraceObserver<W: TraceWriter> {
    writer:        W,
    seq:           u64,
    /// Record rejected edges as well as states.
    rejections:    bool,
    /// Vertex whose edges are currently being relaxed.
    expanding:     VertexId,
    last_stats:    Option<SearchStats>,
    last_error:    Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            seq: 0,
            rejections: true,
            expanding: VertexId::INVALID,
            last_stats: None,
            last_error: None,
        }
    }

    /// Skip `reject:*` rows.
    pub fn without_rejections(mut self) -> Self {
        self.rejections = false;
        self
    }

    /// Take the stored write error (if any) after the search returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Statistics of the last search that ran to completion.
    pub fn stats(&self) -> Option<&SearchStats> {
        self.last_stats.as_ref()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the search).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn emit(&mut self, event: &'static str, state: StateId, vertex: VertexId, edge: EdgeId, elapsed_secs: f64, weight: f64) {
        let row = TraceRow { seq: self.seq, event, state, vertex, edge, elapsed_secs, weight };
        self.seq += 1;
        let result = self.writer.write_row(&row);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

fn reject_event(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::Permission      => "reject:permission",
        RejectReason::TurnRestriction => "reject:turn_restriction",
    }
}

impl<W: TraceWriter> SearchObserver for TraceObserver<W> {
    fn on_expand(&mut self, id: StateId, state: &SearchState) {
        self.expanding = state.vertex;
        self.emit("expand", id, state.vertex, state.back_edge, state.elapsed_secs, state.weight);
    }

    fn on_edge_rejected(&mut self, edge: EdgeId, reason: RejectReason) {
        if self.rejections {
            let vertex = self.expanding;
            self.emit(reject_event(reason), StateId::INVALID, vertex, edge, f64::NAN, f64::NAN);
        }
    }

    fn on_state_created(&mut self, id: StateId, state: &SearchState) {
        self.emit("open", id, state.vertex, state.back_edge, state.elapsed_secs, state.weight);
    }

    fn on_search_end(&mut self, stats: &SearchStats) {
        self.last_stats = Some(*stats);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
