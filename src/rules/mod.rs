//! Rule model and evaluation for hookgate
//!
//! This module provides the pattern rules that hook gates are built from:
//! a compiled [`Rule`] is evaluated against a [`GateInput`] and produces a
//! [`Verdict`]. Rules are pure: evaluation has no side effects and no state
//! survives the invocation.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod gate;

pub use gate::{Gate, GateReport, GateStatus};

/// Severity of a failing rule.
///
/// A failing `Block` rule denies the guarded action; a failing `Warn` rule is
/// reported but never changes the outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Block,
    Warn,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Block => write!(f, "block"),
            Severity::Warn => write!(f, "warn"),
        }
    }
}

/// How a rule's pattern relates to the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The pattern must match somewhere in the input (format checks).
    Require,
    /// The pattern must not match anywhere in the input (secret checks).
    #[default]
    Forbid,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Require => write!(f, "require"),
            MatchMode::Forbid => write!(f, "forbid"),
        }
    }
}

/// One unit of checked text with an optional source label (file path or ref).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputItem {
    pub label: Option<String>,
    pub text: String,
}

/// The input a gate evaluates: an ordered list of labelled text items.
///
/// A commit message is a single unlabelled item; a staged or pushed diff is
/// one item per changed file, labelled with the file path and carrying only
/// the added lines. Constructed fresh per invocation and never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateInput {
    pub items: Vec<InputItem>,
}

impl GateInput {
    /// Build an input from a single unlabelled text blob.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            items: vec![InputItem {
                label: None,
                text: text.into(),
            }],
        }
    }

    /// Append one labelled item.
    pub fn push(&mut self, label: Option<String>, text: String) {
        self.items.push(InputItem { label, text });
    }
}

/// Where a forbidden pattern matched: source label plus 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSite {
    pub label: Option<String>,
    pub line: usize,
}

/// Outcome of one rule against one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub rule_id: String,
    pub severity: Severity,
    pub passed: bool,
    /// The rule's message, present when the rule failed.
    pub message: Option<String>,
    /// Match locations, populated for failing forbid rules.
    pub sites: Vec<MatchSite>,
}

/// A compiled validation rule.
///
/// Immutable once built. The pattern is compiled at configuration-load time,
/// so a malformed pattern surfaces as a configuration error before any rule
/// runs.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub pattern: Regex,
    pub mode: MatchMode,
    pub severity: Severity,
    pub message: String,
    files: Option<GlobSet>,
}

impl Rule {
    /// Compile a new rule. Fails fast on an invalid pattern.
    pub fn new(
        id: impl Into<String>,
        pattern: &str,
        mode: MatchMode,
        severity: Severity,
        message: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        let pattern = Regex::new(pattern)
            .with_context(|| format!("invalid pattern for rule '{id}': {pattern}"))?;

        Ok(Self {
            id,
            pattern,
            mode,
            severity,
            message: message.into(),
            files: None,
        })
    }

    /// Restrict the rule to items whose label matches one of `globs`.
    ///
    /// With a non-empty scope, unlabelled items (e.g. a commit message) are
    /// out of scope. An empty slice leaves the rule unscoped.
    pub fn scoped_to(mut self, globs: &[String]) -> Result<Self> {
        if globs.is_empty() {
            return Ok(self);
        }

        let mut builder = GlobSetBuilder::new();
        for glob in globs {
            let glob = Glob::new(glob)
                .with_context(|| format!("invalid file glob for rule '{}': {glob}", self.id))?;
            builder.add(glob);
        }
        self.files = Some(
            builder
                .build()
                .with_context(|| format!("failed to build file globs for rule '{}'", self.id))?,
        );

        Ok(self)
    }

    fn in_scope(&self, item: &InputItem) -> bool {
        match (&self.files, &item.label) {
            (None, _) => true,
            (Some(globs), Some(label)) => globs.is_match(label),
            (Some(_), None) => false,
        }
    }

    /// Evaluate this rule against `input`.
    ///
    /// Require rules match the whole text of each in-scope item and fail only
    /// when no item matches; with nothing in scope they pass vacuously.
    /// Forbid rules scan line by line so every match site can be reported,
    /// which also means an empty input always passes them.
    pub fn evaluate(&self, input: &GateInput) -> Verdict {
        let mut sites = Vec::new();
        let mut required_match = false;
        let mut saw_item = false;

        for item in input.items.iter().filter(|item| self.in_scope(item)) {
            saw_item = true;
            match self.mode {
                MatchMode::Require => {
                    if self.pattern.is_match(&item.text) {
                        required_match = true;
                        break;
                    }
                }
                MatchMode::Forbid => {
                    for (idx, line) in item.text.lines().enumerate() {
                        if self.pattern.is_match(line) {
                            sites.push(MatchSite {
                                label: item.label.clone(),
                                line: idx + 1,
                            });
                        }
                    }
                }
            }
        }

        let passed = match self.mode {
            MatchMode::Require => required_match || !saw_item,
            MatchMode::Forbid => sites.is_empty(),
        };

        Verdict {
            rule_id: self.id.clone(),
            severity: self.severity,
            passed,
            message: (!passed).then(|| self.message.clone()),
            sites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forbid(id: &str, pattern: &str) -> Rule {
        Rule::new(id, pattern, MatchMode::Forbid, Severity::Block, "forbidden").unwrap()
    }

    fn require(id: &str, pattern: &str) -> Rule {
        Rule::new(id, pattern, MatchMode::Require, Severity::Block, "required").unwrap()
    }

    #[test]
    fn test_invalid_pattern_fails_at_compile_time() {
        let err = Rule::new(
            "broken",
            "[unclosed",
            MatchMode::Forbid,
            Severity::Block,
            "never runs",
        )
        .unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_forbid_rule_fails_when_pattern_matches() {
        let rule = forbid("no-todo", r"TODO");
        let verdict = rule.evaluate(&GateInput::text("fn main() { // TODO fix }"));
        assert!(!verdict.passed);
        assert_eq!(verdict.message.as_deref(), Some("forbidden"));
    }

    #[test]
    fn test_forbid_rule_passes_without_match() {
        let rule = forbid("no-todo", r"TODO");
        let verdict = rule.evaluate(&GateInput::text("fn main() {}"));
        assert!(verdict.passed);
        assert!(verdict.message.is_none());
        assert!(verdict.sites.is_empty());
    }

    #[test]
    fn test_forbid_rule_reports_every_match_site() {
        let rule = forbid("secret", r#"password\s*=\s*"[^"]+""#);
        let mut input = GateInput::default();
        input.push(
            Some("config.py".into()),
            "host = \"db\"\npassword = \"hunter2\"\n".into(),
        );
        input.push(Some("app.py".into()), "password = \"again\"\n".into());

        let verdict = rule.evaluate(&input);
        assert!(!verdict.passed);
        assert_eq!(
            verdict.sites,
            vec![
                MatchSite {
                    label: Some("config.py".into()),
                    line: 2
                },
                MatchSite {
                    label: Some("app.py".into()),
                    line: 1
                },
            ]
        );
    }

    #[test]
    fn test_require_rule_fails_when_pattern_absent() {
        let rule = require("issue-ref", r"#\d+");
        let verdict = rule.evaluate(&GateInput::text("fix the login page"));
        assert!(!verdict.passed);
    }

    #[test]
    fn test_require_rule_passes_when_pattern_present() {
        let rule = require("issue-ref", r"#\d+");
        assert!(rule.evaluate(&GateInput::text("fix login (#42)")).passed);
    }

    #[test]
    fn test_empty_text_passes_forbid_but_fails_require() {
        let input = GateInput::text("");
        assert!(forbid("secret", r"password").evaluate(&input).passed);
        assert!(!require("issue-ref", r"#\d+").evaluate(&input).passed);
    }

    #[test]
    fn test_empty_input_passes_both_modes_vacuously() {
        let input = GateInput::default();
        assert!(forbid("secret", r"password").evaluate(&input).passed);
        assert!(require("issue-ref", r"#\d+").evaluate(&input).passed);
    }

    #[test]
    fn test_scoped_rule_ignores_out_of_scope_items() {
        let rule = forbid("py-only", r"print\(")
            .scoped_to(&["*.py".to_string()])
            .unwrap();

        let mut input = GateInput::default();
        input.push(Some("keep.rs".into()), "print(\"rust\")".into());
        assert!(rule.evaluate(&input).passed);

        input.push(Some("debug.py".into()), "print(\"py\")".into());
        let verdict = rule.evaluate(&input);
        assert!(!verdict.passed);
        assert_eq!(verdict.sites.len(), 1);
        assert_eq!(verdict.sites[0].label.as_deref(), Some("debug.py"));
    }

    #[test]
    fn test_scoped_rule_skips_unlabelled_items() {
        let rule = forbid("py-only", r"print\(")
            .scoped_to(&["*.py".to_string()])
            .unwrap();
        assert!(rule.evaluate(&GateInput::text("print(\"x\")")).passed);
    }

    #[test]
    fn test_invalid_glob_fails_at_compile_time() {
        let err = forbid("bad-scope", r"x")
            .scoped_to(&["a[".to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("bad-scope"));
    }
}
