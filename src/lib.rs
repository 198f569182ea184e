//! parking-ledger - An in-memory vehicle parking ledger
//!
//! This crate provides:
//! - Slot-limited admission with one active entry per plate number
//! - Unique parking tokens in a configurable format
//! - Time-based exit billing with a one-hour minimum
//! - An interactive menu and a scriptable batch mode
//!
//! Nothing is persisted; a ledger lives as long as the value that owns it.

//! # Example
//!
//! ```rust
//! use parking_ledger::core::LedgerBuilder;
//!
//! let mut ledger = LedgerBuilder::new().total_slots(2).build()?;
//!
//! let token = ledger.park("Anita", "9876543210", "KA01AB1234", 1)?;
//! assert_eq!(ledger.remaining_slots(), (1, 2));
//!
//! let receipt = ledger.remove(token.as_str())?;
//! assert_eq!(receipt.vehicle_type_name, "Car");
//! assert_eq!(receipt.total_cost.to_string(), "30.00");
//! # Ok::<(), parking_ledger::ParkingError>(())
//! ```

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::indexing_slicing)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod interactive;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{LedgerError, ParkingError, Result};
