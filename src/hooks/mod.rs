//! Hook adapters
//!
//! Each adapter gathers the text its hook inspects (staged diff, commit
//! message file, outgoing ref ranges), hands it to the configured gate, and
//! returns the report. Printing and exit codes stay in the CLI layer.

pub mod commit_msg;
pub mod pre_commit;
pub mod pre_push;

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::config::Config;
use crate::git::GitRepo;
use crate::rules::GateReport;

/// The git hooks hookgate can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    PreCommit,
    CommitMsg,
    PrePush,
}

impl HookKind {
    pub const ALL: [HookKind; 3] = [HookKind::PreCommit, HookKind::CommitMsg, HookKind::PrePush];

    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::PreCommit => "pre-commit",
            HookKind::CommitMsg => "commit-msg",
            HookKind::PrePush => "pre-push",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pre-commit" => Ok(HookKind::PreCommit),
            "commit-msg" => Ok(HookKind::CommitMsg),
            "pre-push" => Ok(HookKind::PrePush),
            other => anyhow::bail!(
                "unknown hook '{other}' (expected pre-commit, commit-msg or pre-push)"
            ),
        }
    }
}

/// Run the gate for `kind` with the arguments git passed to the hook.
pub fn run(kind: HookKind, config: &Config, args: &[String]) -> Result<GateReport> {
    match kind {
        HookKind::PreCommit => {
            let repo = GitRepo::discover()?;
            pre_commit::run(config, &repo)
        }
        HookKind::CommitMsg => {
            let path = args
                .first()
                .context("commit-msg hook expects the message file path as its argument")?;
            commit_msg::run(config, Path::new(path))
        }
        HookKind::PrePush => {
            let repo = GitRepo::discover()?;
            let stdin = std::io::stdin();
            pre_push::run(config, &repo, stdin.lock())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_kind_round_trips_through_its_name() {
        for kind in HookKind::ALL {
            assert_eq!(kind.as_str().parse::<HookKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_hook_name_is_rejected() {
        let err = "post-merge".parse::<HookKind>().unwrap_err();
        assert!(err.to_string().contains("unknown hook"));
    }

    #[test]
    fn test_commit_msg_without_a_path_argument_is_an_error() {
        let config = Config::default();
        let err = run(HookKind::CommitMsg, &config, &[]).unwrap_err();
        assert!(err.to_string().contains("message file path"));
    }
}
