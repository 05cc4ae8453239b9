//! Run command: execute one hook's gate
//!
//! This is the entry point the stubs in .git/hooks call. The exit code is
//! the whole contract with git: zero allows the operation, non-zero denies
//! it. Warn-only failures are printed and the operation still goes through.

use anyhow::Result;
use std::path::Path;

use super::print_report;
use crate::cli::Output;
use crate::config::Config;
use crate::hooks::{self, HookKind};

pub fn execute(
    hook: &str,
    args: &[String],
    config_path: Option<&Path>,
    output: &Output,
) -> Result<()> {
    let kind: HookKind = hook.parse()?;
    let config = Config::load(config_path)?;
    config.validate()?;

    if !config.hook(kind).enabled {
        output.info(&format!("{kind} gate is disabled, skipping"));
        return Ok(());
    }

    output.verbose(&format!(
        "{kind}: {} rules configured",
        config.hook(kind).rules.len()
    ));

    let report = hooks::run(kind, &config, args)?;
    print_report(&report, kind, output);

    if report.denied() {
        std::process::exit(1);
    }
    Ok(())
}
