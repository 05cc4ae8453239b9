//! Rules command: list the configured rules per hook

use anyhow::Result;
use std::path::Path;

use crate::cli::{Output, OutputFormat};
use crate::config::Config;
use crate::hooks::HookKind;

pub fn execute(
    hook: Option<&str>,
    format: OutputFormat,
    config_path: Option<&Path>,
    output: &Output,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let kinds: Vec<HookKind> = match hook {
        Some(name) => vec![name.parse()?],
        None => HookKind::ALL.to_vec(),
    };

    if format == OutputFormat::Json {
        let mut listing = serde_json::Map::new();
        for kind in &kinds {
            listing.insert(
                kind.to_string(),
                serde_json::to_value(&config.hook(*kind).rules)?,
            );
        }
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for kind in kinds {
        let hook_config = config.hook(kind);
        if hook_config.enabled {
            output.header(kind.as_str());
        } else {
            output.header(&format!("{kind} (disabled)"));
        }

        if hook_config.rules.is_empty() {
            output.info("no rules configured");
            continue;
        }

        for rule in &hook_config.rules {
            if rule.enabled {
                output.list_item(&format!("{} ({}, {})", rule.id, rule.mode, rule.severity));
            } else {
                output.list_item(&format!("○ {} (disabled)", rule.id));
            }
            output.verbose(&format!("  pattern: {}", rule.pattern));
        }
    }

    output.blank_line();
    Ok(())
}
