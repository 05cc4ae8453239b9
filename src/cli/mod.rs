//! Command-line interface for hookgate
//!
//! Main CLI structure and command handling. Argument parsing uses clap;
//! every command loads its configuration fresh, so rule edits take effect
//! on the next git operation without any daemon or cache to poke.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod output;

pub use output::Output;

/// hookgate - Pattern-based policy gates for git hooks
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true, env = "HOOKGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a hook's gate; this is what the stubs in .git/hooks call
    Run {
        /// Hook to run (pre-commit, commit-msg, pre-push)
        hook: String,

        /// Arguments git passed to the hook
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Check text against a hook's rules without touching the repository
    Check(CheckArgs),
    /// List the configured rules
    Rules {
        /// Restrict the listing to one hook
        hook: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Show version information
    Version,
}

/// Arguments for the check command
#[derive(Args)]
pub struct CheckArgs {
    /// Hook whose rules to apply (pre-commit, commit-msg, pre-push)
    pub hook: String,

    /// Read the text from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a starter config file with the default rules
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration
    Validate,
    /// Show the effective configuration
    Show,
}

/// Report formats for human and machine consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let output = Output::new(self.verbose, self.quiet);
        let config_path = self.config.as_deref();

        match self.command {
            Some(Commands::Run { hook, args }) => {
                commands::run::execute(&hook, &args, config_path, &output)
            }
            Some(Commands::Check(args)) => commands::check::execute(&args, config_path, &output),
            Some(Commands::Rules { hook, format }) => {
                commands::rules::execute(hook.as_deref(), format, config_path, &output)
            }
            Some(Commands::Config(cmd)) => commands::config::execute(cmd, config_path, &output),
            Some(Commands::Version) => commands::version::execute(&output),
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}
