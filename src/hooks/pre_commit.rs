//! Pre-commit gate adapter
//!
//! Collects the added lines of the staged diff and runs the pre-commit rules
//! against them, one labelled input item per touched file.

use anyhow::Result;
use tracing::debug;

use crate::config::Config;
use crate::git::GitRepo;
use crate::hooks::HookKind;
use crate::rules::{Gate, GateInput, GateReport};

pub fn run(config: &Config, repo: &GitRepo) -> Result<GateReport> {
    let rules = config.hook_rules(HookKind::PreCommit)?;
    let changes = repo.staged_changes()?;

    let mut input = GateInput::default();
    for change in changes {
        input.push(Some(change.path), change.added.join("\n"));
    }
    debug!(items = input.items.len(), "assembled pre-commit input");

    Ok(Gate::new(rules).run(&input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::rules::{GateStatus, MatchMode, Severity};
    use git2::Repository;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn repo_with_staged(content: &str) -> (TempDir, GitRepo) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("app.cfg"), content).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("app.cfg")).unwrap();
        index.write().unwrap();

        let git = GitRepo::open(dir.path()).unwrap();
        (dir, git)
    }

    fn forbid_marker_config() -> Config {
        let mut config = Config::default();
        config.hooks.pre_commit.rules = vec![RuleConfig {
            id: "no-marker".into(),
            pattern: "FORBIDDEN".into(),
            mode: MatchMode::Forbid,
            severity: Severity::Block,
            message: "marker must not be committed".into(),
            files: Vec::new(),
            enabled: true,
        }];
        config
    }

    #[test]
    fn test_clean_staged_diff_is_allowed() {
        let (_dir, git) = repo_with_staged("plain text\n");
        let report = run(&forbid_marker_config(), &git).unwrap();
        assert_eq!(report.status, GateStatus::Allow);
    }

    #[test]
    fn test_staged_marker_denies_and_names_the_file() {
        let (_dir, git) = repo_with_staged("fine\nFORBIDDEN here\n");
        let report = run(&forbid_marker_config(), &git).unwrap();

        assert_eq!(report.status, GateStatus::Deny);
        let verdict = report.failures().next().unwrap();
        assert_eq!(verdict.rule_id, "no-marker");
        assert_eq!(verdict.sites[0].label.as_deref(), Some("app.cfg"));
        assert_eq!(verdict.sites[0].line, 2);
    }

    #[test]
    fn test_empty_staging_area_is_allowed() {
        let dir = TempDir::new().unwrap();
        Repository::init(dir.path()).unwrap();
        let git = GitRepo::open(dir.path()).unwrap();

        let report = run(&forbid_marker_config(), &git).unwrap();
        assert_eq!(report.status, GateStatus::Allow);
        assert!(report.verdicts.iter().all(|v| v.passed));
    }
}
