use crate::guard::CycleGuard;
use crate::path::GraphPath;
use samegraph_common::Node;
use serde::Serialize;

/// A recorded divergence between expected and actual at a specific path.
/// Values are stored pre-formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct Mismatch {
    pub path: String,
    pub expected: String,
    pub actual: String,
}

/// Ordered ledger of divergences from one match call, in discovery order
/// (depth-first, properties in declared order).
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchReport {
    mismatches: Vec<Mismatch>,
}

impl MatchReport {
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    /// One line per divergence, `<path> is <actual> instead of <expected>`.
    pub fn render(&self) -> String {
        self.mismatches
            .iter()
            .map(|m| format!("{} is <{}> instead of <{}>", m.path, m.actual, m.expected))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn record(&mut self, expected: &Node, actual: &Node, path: &GraphPath) {
        self.mismatches.push(Mismatch {
            path: path.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
}

/// Per-call state of one match invocation: the cycle guard and the mismatch
/// ledger. Created fresh for every call, never shared.
#[derive(Default)]
pub(crate) struct MatchContext {
    pub guard: CycleGuard,
    pub report: MatchReport,
}
