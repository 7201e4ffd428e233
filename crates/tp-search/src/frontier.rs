//! Priority frontier of open states.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tp_core::StateId;

#[derive(Copy, Clone, Debug)]
struct Entry {
    key:   f64,
    seq:   u64,
    state: StateId,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap yields the smallest key, then the earliest push.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority queue keyed by `weight + heuristic`.
///
/// Equal keys pop in insertion order, which keeps searches deterministic.
/// Superseded entries are not removed; the engine discards them when popped.
#[derive(Debug, Default)]
pub struct Frontier {
    heap:     BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: f64, state: StateId) {
        self.heap.push(Entry { key, seq: self.next_seq, state });
        self.next_seq += 1;
    }

    /// Pop the entry with the smallest key, returning `(key, state)`.
    pub fn pop(&mut self) -> Option<(f64, StateId)> {
        self.heap.pop().map(|e| (e.key, e.state))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
