//! Check command: run a hook's rules against arbitrary text
//!
//! Feeds a file or stdin through the configured rules without touching the
//! repository. Handy for trying out a new pattern before it gates anything.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use super::print_report;
use crate::cli::{CheckArgs, Output, OutputFormat};
use crate::config::Config;
use crate::hooks::HookKind;
use crate::rules::{Gate, GateInput};

pub fn execute(args: &CheckArgs, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let kind: HookKind = args.hook.parse()?;
    let config = Config::load(config_path)?;
    let rules = config.hook_rules(kind)?;

    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read from stdin")?;
            buf
        }
    };

    let label = args.file.as_ref().map(|path| path.display().to_string());
    let mut input = GateInput::default();
    input.push(label, text);

    output.verbose(&format!("{kind}: checking against {} rules", rules.len()));
    let report = Gate::new(rules).run(&input);

    match args.format {
        OutputFormat::Text => print_report(&report, kind, output),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.denied() {
        std::process::exit(1);
    }
    Ok(())
}
