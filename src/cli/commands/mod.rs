//! Command implementations for the hookgate CLI
//!
//! One module per command. `print_report` renders gate reports the same way
//! everywhere so run and check stay consistent.

pub mod check;
pub mod config;
pub mod rules;
pub mod run;
pub mod version;

use crate::cli::Output;
use crate::hooks::HookKind;
use crate::rules::{GateReport, Severity};

/// Render a gate report: one line per failing rule with its match sites
/// indented beneath it, then a one-line summary.
pub fn print_report(report: &GateReport, kind: HookKind, output: &Output) {
    for verdict in report.failures() {
        let message = verdict.message.as_deref().unwrap_or(&verdict.rule_id);
        let line = format!("[{}] {}", verdict.rule_id, message);
        match verdict.severity {
            Severity::Block => output.error(&line),
            Severity::Warn => output.warning(&line),
        }

        for site in &verdict.sites {
            match &site.label {
                Some(label) => output.indent(&format!("{}:{}", label, site.line)),
                None => output.indent(&format!("line {}", site.line)),
            }
        }
    }

    if report.denied() {
        let blocking = report
            .failures()
            .filter(|verdict| verdict.severity == Severity::Block)
            .count();
        output.error(&format!(
            "{kind}: blocked ({blocking} failing check{})",
            if blocking == 1 { "" } else { "s" }
        ));
    } else {
        output.success(&format!("{kind}: checks passed"));
    }
}
