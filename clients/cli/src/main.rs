mod commands;
mod config;
mod interactive;
mod options;
mod rendering;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::command_tree;
use config::Config;
use interactive::{handle_interactive, run_once};
use options::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    init_tracing(cli.debug, config.log_filter.as_deref());

    if cli.no_color {
        colored::control::set_override(false);
    }

    let tree = command_tree(&config);

    match cli.command {
        Some(line) => {
            run_once(&tree, &line, cli.raw)?;
            Ok(())
        }
        None => handle_interactive(&tree, &config, cli.raw),
    }
}

fn init_tracing(debug: bool, configured: Option<&str>) {
    // Initialize tracing with filter based on debug flag and config
    let default = if debug {
        "stash=debug,stash_core=debug"
    } else {
        configured.unwrap_or("stash=info,stash_core=info")
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
