//! Commit message gate adapter
//!
//! Reads the proposed message from the path git passes to the commit-msg
//! hook, strips comment lines, and runs the commit-msg rules against it.
//! An unreadable message file is a denial, never a silent pass.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::hooks::HookKind;
use crate::rules::{Gate, GateInput, GateReport};

pub fn run(config: &Config, msg_file: &Path) -> Result<GateReport> {
    let rules = config.hook_rules(HookKind::CommitMsg)?;

    let raw = fs::read_to_string(msg_file)
        .with_context(|| format!("failed to read commit message file {}", msg_file.display()))?;
    let message = strip_comments(&raw);

    Ok(Gate::new(rules).run(&GateInput::text(message)))
}

/// Drop the `#` comment lines git adds below the message template. Blank
/// lines and body content stay untouched.
fn strip_comments(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::GateStatus;
    use std::fs;
    use tempfile::TempDir;

    fn write_msg(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("COMMIT_EDITMSG");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_conventional_message_is_allowed() {
        let dir = TempDir::new().unwrap();
        let path = write_msg(&dir, "feat: add login flow\n\nCloses #42\n");

        let report = run(&Config::default(), &path).unwrap();
        assert_eq!(report.status, GateStatus::Allow);
    }

    #[test]
    fn test_free_form_message_is_denied() {
        let dir = TempDir::new().unwrap();
        let path = write_msg(&dir, "add login feature\n");

        let report = run(&Config::default(), &path).unwrap();
        assert_eq!(report.status, GateStatus::Deny);
        assert_eq!(
            report.failures().next().unwrap().rule_id,
            "conventional-commit"
        );
    }

    #[test]
    fn test_comment_lines_are_not_part_of_the_message() {
        let dir = TempDir::new().unwrap();
        let path = write_msg(
            &dir,
            "feat: add login flow #7\n# Please enter the commit message for your changes.\n",
        );

        let report = run(&Config::default(), &path).unwrap();
        assert_eq!(report.status, GateStatus::Allow);
        assert!(report.verdicts.iter().all(|v| v.passed));
    }

    #[test]
    fn test_message_that_is_only_comments_is_denied() {
        let dir = TempDir::new().unwrap();
        let path = write_msg(&dir, "# nothing here\n# at all\n");

        let report = run(&Config::default(), &path).unwrap();
        assert_eq!(report.status, GateStatus::Deny);
    }

    #[test]
    fn test_missing_message_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist");

        let err = run(&Config::default(), &path).unwrap_err();
        assert!(err.to_string().contains("commit message file"));
    }
}
