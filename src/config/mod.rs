//! Configuration for parking-ledger
//!
//! Sources are layered, later ones winning:
//!
//! 1. built-in defaults
//! 2. `config.toml` in the user config directory (optional)
//! 3. a file passed with `--config` (required when given)
//! 4. `PARKING_LEDGER_*` environment variables, `__` between sections,
//!    e.g. `PARKING_LEDGER_LEDGER__TOTAL_SLOTS=20`

use crate::core::{DEFAULT_MAX_RANDOM_DRAWS, DEFAULT_TOTAL_SLOTS, TokenFormat};
use crate::error::{ParkingError, Result};
use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PARKING_LEDGER";

/// Effective configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ledger: LedgerSettings,
    pub ui: UiSettings,
}

/// `[ledger]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSettings {
    pub total_slots: usize,
    pub token: TokenFormat,
    pub max_random_draws: u32,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            total_slots: DEFAULT_TOTAL_SLOTS,
            token: TokenFormat::default(),
            max_random_draws: DEFAULT_MAX_RANDOM_DRAWS,
        }
    }
}

/// `[ui]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub currency_symbol: String,
    /// strftime pattern for entry and exit times
    pub timestamp_format: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "Rs.".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

impl Config {
    /// Load from every source, with `explicit` as the `--config` file
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let user_file = Self::user_config_path();
        Self::load_layered(user_file.as_deref(), explicit)
    }

    /// Defaults plus environment, ignoring any files
    pub fn load_or_default() -> Result<Self> {
        Self::load_layered(None, None)
    }

    /// `<config dir>/parking-ledger/config.toml` if a home directory exists
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "parking-ledger").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn load_layered(user_file: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        let mut builder =
            ::config::Config::builder().add_source(::config::Config::try_from(&Self::default())?);

        if let Some(path) = user_file {
            tracing::debug!(path = %path.display(), "reading user config if present");
            builder = builder.add_source(::config::File::from(path).required(false));
        }
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "reading config file");
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the ledger or the output layer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.ledger.total_slots == 0 {
            return Err(ParkingError::invalid_config(
                "ledger.total_slots must be greater than zero",
            ));
        }
        self.ledger.token.validate()?;
        self.ledger.token.ensure_room_for(self.ledger.total_slots)?;
        if StrftimeItems::new(&self.ui.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ParkingError::invalid_config(format!(
                "ui.timestamp_format is not a valid strftime pattern: '{}'",
                self.ui.timestamp_format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    #[serial]
    fn test_defaults() {
        let config = Config::load_or_default().unwrap();
        assert_eq!(config.ledger.total_slots, 100);
        assert_eq!(config.ledger.token, TokenFormat::new(6, "ABC"));
        assert_eq!(config.ledger.max_random_draws, 1024);
        assert_eq!(config.ui.currency_symbol, "Rs.");
    }

    #[test]
    #[serial]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
[ledger]
total_slots = 12

[ledger.token]
suffix = "PRK"

[ui]
currency_symbol = "$"
"#,
        );

        let config = Config::load_layered(None, Some(file.path())).unwrap();
        assert_eq!(config.ledger.total_slots, 12);
        assert_eq!(config.ledger.token.suffix, "PRK");
        assert_eq!(config.ledger.token.digits, 6);
        assert_eq!(config.ui.currency_symbol, "$");
    }

    #[test]
    #[serial]
    fn test_missing_user_file_is_ignored() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("config.toml");
        let config = Config::load_layered(Some(&missing), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load_layered(None, Some(&missing)).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let file = toml_file("[ledger]\ntotal_slots = 12\n");

        // SAFETY: serialized with every other test that reads the environment
        unsafe { std::env::set_var("PARKING_LEDGER_LEDGER__TOTAL_SLOTS", "20") };
        let result = Config::load_layered(None, Some(file.path()));
        unsafe { std::env::remove_var("PARKING_LEDGER_LEDGER__TOTAL_SLOTS") };

        assert_eq!(result.unwrap().ledger.total_slots, 20);
    }

    #[test]
    #[serial]
    fn test_invalid_values_rejected() {
        let file = toml_file("[ledger]\ntotal_slots = 0\n");
        assert!(Config::load_layered(None, Some(file.path())).is_err());

        let file = toml_file("[ledger.token]\ndigits = 0\n");
        assert!(Config::load_layered(None, Some(file.path())).is_err());

        let file = toml_file("[ui]\ntimestamp_format = \"%Q\"\n");
        assert!(Config::load_layered(None, Some(file.path())).is_err());
    }

    #[test]
    fn test_slots_must_fit_token_space() {
        let mut config = Config::default();
        config.ledger.token.digits = 1;
        config.ledger.total_slots = 10;
        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("distinct tokens"));

        config.ledger.total_slots = 9;
        assert!(config.validate().is_ok());
    }
}
