//! Gate runner: ordered rule evaluation with an aggregate allow/deny outcome.

use serde::Serialize;
use tracing::debug;

use super::{GateInput, Rule, Severity, Verdict};

/// Overall outcome of a gate run.
///
/// `Deny` iff at least one block-severity rule failed; warn failures are
/// reported but never deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GateStatus {
    Allow,
    Deny,
}

/// The verdicts of one gate run, in rule order, plus the derived status.
///
/// Exactly one report is produced per invocation; it is data only, and acting
/// on it (printing, exit status) is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateReport {
    pub verdicts: Vec<Verdict>,
    pub status: GateStatus,
}

impl GateReport {
    pub fn denied(&self) -> bool {
        self.status == GateStatus::Deny
    }

    /// Failing verdicts, in rule order.
    pub fn failures(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(|v| !v.passed)
    }
}

/// Runs an ordered set of rules over one input.
pub struct Gate {
    rules: Vec<Rule>,
}

impl Gate {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Evaluate every rule against `input` and derive the overall status.
    ///
    /// No short-circuiting: all verdicts are collected so every diagnostic
    /// can be printed. Order affects only the verdict order, never the
    /// status.
    pub fn run(&self, input: &GateInput) -> GateReport {
        debug!(
            rules = self.rules.len(),
            items = input.items.len(),
            "running gate"
        );

        let verdicts: Vec<Verdict> = self.rules.iter().map(|rule| rule.evaluate(input)).collect();
        let status = if verdicts
            .iter()
            .any(|v| !v.passed && v.severity == Severity::Block)
        {
            GateStatus::Deny
        } else {
            GateStatus::Allow
        };

        GateReport { verdicts, status }
    }
}
