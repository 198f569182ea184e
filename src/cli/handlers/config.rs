//! Handler for the `config` command

use crate::cli::ConfigCommands;
use crate::cli::output::OutputFormatter;
use crate::config::Config;
use crate::error::Result;

/// Handle `config show` and `config path`
pub fn handle_config_command(
    command: &ConfigCommands,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        ConfigCommands::Show => show_config(config, formatter),
        ConfigCommands::Path => show_path(formatter),
    }
}

fn show_config(config: &Config, formatter: &OutputFormatter) -> Result<()> {
    if formatter.is_json() {
        return formatter.print_json(config);
    }

    formatter.info("[ledger]");
    formatter.info(&format!("total_slots = {}", config.ledger.total_slots));
    formatter.info(&format!(
        "max_random_draws = {}",
        config.ledger.max_random_draws
    ));
    formatter.info("");
    formatter.info("[ledger.token]");
    formatter.info(&format!("digits = {}", config.ledger.token.digits));
    formatter.info(&format!("suffix = \"{}\"", config.ledger.token.suffix));
    formatter.info("");
    formatter.info("[ui]");
    formatter.info(&format!(
        "currency_symbol = \"{}\"",
        config.ui.currency_symbol
    ));
    formatter.info(&format!(
        "timestamp_format = \"{}\"",
        config.ui.timestamp_format
    ));
    Ok(())
}

fn show_path(formatter: &OutputFormatter) -> Result<()> {
    let path = Config::user_config_path();
    if formatter.is_json() {
        return formatter.print_json(&serde_json::json!({
            "path": path,
            "exists": path.as_ref().is_some_and(|p| p.exists()),
        }));
    }

    match path {
        Some(path) => formatter.info(&path.display().to_string()),
        None => formatter.warning("No home directory found; only --config files are read"),
    }
    Ok(())
}
