//! # hookgate - Pattern-based policy gates for git hooks
//!
//! hookgate runs ordered regex rules against the text a git operation is
//! about to introduce: the staged diff before a commit, the commit message
//! before it lands, the outgoing ranges before a push. Every rule is
//! evaluated on every run, blocking failures deny the operation through the
//! exit code, warn-only failures are printed and let it through.
//!
//! ## Quick Start
//!
//! ```bash
//! # Install hookgate
//! cargo install hookgate
//!
//! # Write a starter config with the default rules
//! hookgate config init
//!
//! # Wire it into a hook: .git/hooks/commit-msg
//! #   #!/bin/sh
//! #   exec hookgate run commit-msg "$@"
//! ```

pub mod cli;
pub mod config;
pub mod git;
pub mod hooks;
pub mod rules;

pub use cli::{Cli, Output};
pub use config::Config;
pub use rules::{Gate, GateInput, GateReport, GateStatus, MatchMode, Rule, Severity, Verdict};

/// Result type alias for hookgate operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
