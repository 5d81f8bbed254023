//! Weaver CLI - template-driven code generation
//!
//! Usage: weaver <COMMAND>
//!
//! Commands:
//!   generate  Run generation units
//!   check     Validate unit files without generating

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use weaver::WeaverError;

/// Filter directives read from the environment; `-v` flags apply otherwise.
const LOG_ENV: &str = "WEAVER_LOG";

fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            config,
            force_regenerate,
        } => commands::cmd_generate(&config, force_regenerate, cli.json, cli.verbose),
        Commands::Check { config } => commands::cmd_check(&config, cli.json),
    }
}

fn setup_tracing(verbose: u8) {
    use std::io::IsTerminal;

    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "weaver=info,warn",
            2 => "weaver=debug,info",
            _ => "weaver=trace,debug",
        })
    });

    // stdout is reserved for reports and NDJSON events
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<WeaverError>()
        .map(|err| err.category().exit_code())
        .unwrap_or(1)
}
