//! Core ledger types
//!
//! Everything needed to park, bill and release vehicles, with no terminal
//! or configuration concerns.

pub mod billing;
mod builders;
pub mod clock;
mod ledger;
mod shared;
mod token;
mod vehicle;

pub use billing::{Fee, Receipt};
pub use builders::{DEFAULT_TOTAL_SLOTS, LedgerBuilder, ParkedVehicleBuilder};
pub use clock::{Clock, ManualClock, SystemClock};
pub use ledger::{Occupancy, ParkedVehicles, ParkingLedger};
pub use shared::SharedLedger;
pub use token::{DEFAULT_MAX_RANDOM_DRAWS, MAX_TOKEN_DIGITS, Token, TokenFormat, TokenGenerator};
pub use vehicle::{ParkedVehicle, VehicleType, VehicleTypeCatalog};
