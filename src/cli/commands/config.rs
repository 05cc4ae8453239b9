//! Configuration command implementations
//!
//! Init writes a starter file, validate compiles every configured rule, show
//! prints the effective configuration after all layers are merged.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::{ConfigCommands, Output};
use crate::config::Config;
use crate::hooks::HookKind;

pub fn execute(cmd: ConfigCommands, config_path: Option<&Path>, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Init { force } => init(force, output),
        ConfigCommands::Validate => validate(config_path, output),
        ConfigCommands::Show => show(config_path, output),
    }
}

fn init(force: bool, output: &Output) -> Result<()> {
    let path = Path::new("hookgate.toml");
    if path.exists() && !force {
        anyhow::bail!("hookgate.toml already exists (use --force to overwrite)");
    }

    let rendered = toml::to_string_pretty(&Config::default())
        .context("failed to render default configuration")?;
    fs::write(path, rendered).context("failed to write hookgate.toml")?;

    output.success("created hookgate.toml with the default rules");
    output.key_value("Config file:", &path.display().to_string(), false);
    Ok(())
}

fn validate(config_path: Option<&Path>, output: &Output) -> Result<()> {
    let config = Config::load(config_path)?;
    config.validate()?;

    output.success("configuration is valid");
    for kind in HookKind::ALL {
        let hook = config.hook(kind);
        let enabled = hook.rules.iter().filter(|rule| rule.enabled).count();
        output.list_item(&format!(
            "{kind}: {} rule{}, {enabled} enabled",
            hook.rules.len(),
            if hook.rules.len() == 1 { "" } else { "s" }
        ));
    }
    Ok(())
}

fn show(config_path: Option<&Path>, output: &Output) -> Result<()> {
    let source = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => Config::find_file(),
    };
    let config = Config::load(config_path)?;
    let rendered = toml::to_string_pretty(&config).context("failed to render configuration")?;

    match &source {
        Some(path) => output.key_value("Source:", &path.display().to_string(), false),
        None => output.key_value("Source:", "(built-in defaults)", false),
    }
    output.blank_line();
    print!("{rendered}");
    Ok(())
}
