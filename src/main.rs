use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod services;

use cli::Cli;
use commands::{handle_bootstrap_commands, handle_inventory_commands};
use services::context::Context;

fn main() -> anyhow::Result<()> {
    // Warnings go to stderr so --json stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut ctx = Context::new();

    if handle_inventory_commands(&cli, &mut ctx)? {
        return Ok(());
    }
    if handle_bootstrap_commands(&cli, &mut ctx)? {
        return Ok(());
    }
    anyhow::bail!("unhandled command")
}
