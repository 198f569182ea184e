//! Error types for parking-ledger
//!
//! [`LedgerError`] is the closed set of outcomes a ledger operation can fail
//! with. [`ParkingError`] wraps it together with everything the application
//! around the ledger can run into (configuration, terminal I/O, bad input).

use thiserror::Error;

/// Failures reported by [`crate::core::ParkingLedger`] operations
///
/// Every variant leaves the ledger unchanged and usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// All slots are occupied
    #[error("Parking is full! ({total_slots} of {total_slots} slots occupied)")]
    CapacityExceeded { total_slots: usize },

    /// A vehicle with this plate number is already parked
    #[error("Vehicle is already parked! (plate {plate_number})")]
    DuplicateVehicle { plate_number: String },

    /// No parked vehicle carries this token
    #[error("Invalid token! ({token})")]
    InvalidToken { token: String },

    /// The vehicle type id is not in the catalog
    #[error("Unknown vehicle type: {id}")]
    UnknownVehicleType { id: u32 },
}

impl LedgerError {
    /// Short outcome code, stable across releases
    pub const fn code(&self) -> &'static str {
        match self {
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::DuplicateVehicle { .. } => "duplicate_vehicle",
            Self::InvalidToken { .. } => "invalid_token",
            Self::UnknownVehicleType { .. } => "unknown_vehicle_type",
        }
    }
}

/// Application-level error type
#[derive(Error, Debug)]
pub enum ParkingError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read config: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt failed: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ParkingError {
    /// Create an input error with a message
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error with a message
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Short outcome code; ledger rejections keep their own codes
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Ledger(e) => e.code(),
            Self::InvalidConfig(_) | Self::Config(_) => "invalid_config",
            Self::InvalidInput(_) => "invalid_input",
            Self::Io(_) => "io",
            Self::Dialog(_) => "prompt",
            Self::Serialization(_) => "serialization",
        }
    }

    /// Message shown to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Ledger(e) => e.to_string(),
            Self::Dialog(_) => "The interactive prompt was interrupted".to_string(),
            other => other.to_string(),
        }
    }

    /// Hints for resolving the error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Ledger(LedgerError::CapacityExceeded { .. }) => {
                vec!["Remove a parked vehicle to free a slot".to_string()]
            },
            Self::Ledger(LedgerError::DuplicateVehicle { .. }) => {
                vec!["Use 'See the queue' to find the existing token".to_string()]
            },
            Self::Ledger(LedgerError::InvalidToken { .. }) => vec![
                "Check the token printed when the vehicle was parked".to_string(),
                "Tokens are case-sensitive".to_string(),
            ],
            Self::Ledger(LedgerError::UnknownVehicleType { .. }) => {
                vec!["Run 'parking-ledger rates' to list vehicle types".to_string()]
            },
            Self::InvalidConfig(_) | Self::Config(_) => vec![
                "Run 'parking-ledger config show' to inspect the effective configuration"
                    .to_string(),
            ],
            _ => vec![],
        }
    }

    /// Whether the session can carry on after this error
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Ledger(_) | Self::InvalidInput(_))
    }

    /// Whether the error came from configuration
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::Config(_))
    }
}

/// Result type alias for parking-ledger operations
pub type Result<T> = std::result::Result<T, ParkingError>;
