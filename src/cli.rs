use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Weaver - template-driven code generation
#[derive(Parser, Debug)]
#[command(name = "weaver")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run generation units
    Generate {
        /// Unit file; repeat to run several units in order
        #[arg(short, long = "config", default_value = weaver::DEFAULT_UNIT_FILE)]
        config: Vec<PathBuf>,

        /// Regenerate even when sources are unchanged
        #[arg(long)]
        force_regenerate: bool,
    },

    /// Load and validate unit files without generating
    Check {
        /// Unit file; repeat to check several
        #[arg(short, long = "config", default_value = weaver::DEFAULT_UNIT_FILE)]
        config: Vec<PathBuf>,
    },
}
