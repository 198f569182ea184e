//! parking-ledger - In-memory vehicle parking ledger
//!
//! This is the main entry point for the parking-ledger CLI application.
//! It parses arguments, loads configuration and dispatches to the command
//! handlers.

use clap::Parser;
use parking_ledger::cli::handlers::{
    handle_batch_command, handle_config_command, handle_interactive_command,
    handle_rates_command,
};
use parking_ledger::cli::{Cli, Commands, OutputFormatter};
use parking_ledger::config::Config;
use parking_ledger::core::VehicleTypeCatalog;
use parking_ledger::error::{ParkingError, Result};
use std::process;

/// Main entry point for the parking-ledger CLI
fn main() {
    let cli = Cli::parse();
    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    if let Err(e) = run(cli, formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Run the CLI application with the parsed arguments
///
/// # Errors
///
/// Returns any error that occurs while loading configuration or running
/// the command
fn run(cli: Cli, formatter: OutputFormatter) -> Result<()> {
    // Set up logging if verbose mode is enabled
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(slots) = cli.slots {
        config.ledger.total_slots = slots;
        config.validate()?;
    }

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => handle_interactive_command(&config, cli.seed, formatter),
        Commands::Batch { file, manual_clock } => {
            handle_batch_command(file.as_deref(), manual_clock, &config, cli.seed, formatter)
        },
        Commands::Rates => {
            handle_rates_command(&VehicleTypeCatalog::standard(), &config.ui, &formatter)
        },
        Commands::Config { command } => handle_config_command(&command, &config, &formatter),
    }
}

/// Report a fatal error
///
/// The message always goes to stderr. JSON mode adds a machine-readable
/// object on stdout, text mode lists suggestions instead.
fn handle_error(error: &ParkingError, formatter: &OutputFormatter) {
    formatter.error(&error.user_message());
    tracing::debug!(code = error.code(), error = ?error, "command failed");

    let suggestions = error.suggestions();
    if formatter.is_json() {
        let _ = formatter.print_json(&serde_json::json!({
            "status": "error",
            "error": error.code(),
            "message": error.user_message(),
            "suggestions": suggestions,
            "recoverable": error.is_recoverable(),
        }));
    } else if !suggestions.is_empty() {
        eprintln!("\nSuggestions:");
        for suggestion in &suggestions {
            eprintln!("  • {suggestion}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let _cli = Cli::parse_from(["parking-ledger"]);
        let _cli = Cli::parse_from(["parking-ledger", "rates"]);
        let _cli = Cli::parse_from(["parking-ledger", "config", "show"]);
        let _cli = Cli::parse_from(["parking-ledger", "batch", "--file", "script.txt"]);
    }
}
