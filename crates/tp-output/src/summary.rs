//! Issue summary: counts per issue type, plus the issues themselves.

use std::collections::BTreeMap;

use tp_street::StreetGraph;

use crate::writer::IssueWriter;
use crate::{Issue, OutputResult};

/// Issues grouped by type.
///
/// Types are kept in sorted order so summaries and written output are
/// stable across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueSummary {
    by_kind: BTreeMap<String, Vec<Issue>>,
}

impl IssueSummary {
    pub fn new(issues: impl IntoIterator<Item = Issue>) -> Self {
        let mut by_kind: BTreeMap<String, Vec<Issue>> = BTreeMap::new();
        for issue in issues {
            by_kind.entry(issue.kind.clone()).or_default().push(issue);
        }
        Self { by_kind }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Every integrity problem in `graph`, without running a search.
    pub fn from_graph(graph: &StreetGraph) -> Self {
        Self::new(graph.validate().iter().map(|i| Issue::from_integrity(i, graph)))
    }

    /// Merge two summaries; counts of shared types add up.
    pub fn combine(first: &IssueSummary, second: &IssueSummary) -> IssueSummary {
        let mut by_kind = first.by_kind.clone();
        for (kind, issues) in &second.by_kind {
            by_kind.entry(kind.clone()).or_default().extend(issues.iter().cloned());
        }
        Self { by_kind }
    }

    /// Number of issues per type.
    pub fn as_map(&self) -> BTreeMap<&str, u64> {
        self.by_kind
            .iter()
            .map(|(k, v)| (k.as_str(), v.len() as u64))
            .collect()
    }

    pub fn count(&self, kind: &str) -> u64 {
        self.by_kind.get(kind).map_or(0, |v| v.len() as u64)
    }

    pub fn total(&self) -> u64 {
        self.by_kind.values().map(|v| v.len() as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }

    /// All issues, grouped by type in sorted type order.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> + '_ {
        self.by_kind.values().flatten()
    }

    /// One aligned line per type, sorted by type name.
    ///
    /// ```text
    ///   - DanglingRestriction        2
    ///   - NegativeLength         1,204
    /// ```
    pub fn summary_lines(&self) -> Vec<String> {
        let width = self.by_kind.keys().map(String::len).max().unwrap_or(10);
        self.by_kind
            .iter()
            .map(|(kind, issues)| format!("  - {kind:<width$}  {:>7}", group_thousands(issues.len() as u64)))
            .collect()
    }

    /// Log the summary lines at `info` level.
    pub fn log_summary(&self) {
        log::info!("Issue summary (number of each type):");
        for line in self.summary_lines() {
            log::info!("{line}");
        }
    }

    /// Send every issue to `writer` and finish it.
    pub fn write_to<W: IssueWriter + ?Sized>(&self, writer: &mut W) -> OutputResult<()> {
        for issues in self.by_kind.values() {
            writer.write_issues(issues)?;
        }
        writer.finish()
    }
}

/// `1234567` → `"1,234,567"`.
pub(crate) fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
