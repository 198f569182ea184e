//! Command-line interface for parking-ledger

pub mod handlers;
pub mod output;
pub mod utils;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vehicle parking ledger
#[derive(Parser, Debug)]
#[command(name = "parking-ledger", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of parking slots, overriding the configuration
    #[arg(long, global = true, value_name = "N")]
    pub slots: Option<usize>,

    /// Seed for token generation, for reproducible runs
    #[arg(long, global = true, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive parking menu (default)
    Interactive,

    /// Run a script of ledger commands
    ///
    /// One command per line: `park <name...> <phone> <plate> <type-id>`,
    /// `remove <token|#N>`, `list`, `slots`, `advance <duration>`, `exit`.
    Batch {
        /// Script file; reads stdin when omitted
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Use a clock that only moves on `advance`
        #[arg(long)]
        manual_clock: bool,
    },

    /// Show vehicle types and hourly rates
    Rates,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the user configuration file location
    Path,
}
