use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hookgate::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    Cli::parse().run()
}
