//! Command handlers
//!
//! Each subcommand has a `handle_*` entry point. The ledger-driving
//! handlers share [`common::HandlerContext`] for building the session
//! ledger and rendering outcomes.

pub mod batch;
pub mod common;
pub mod config;
pub mod interactive;
pub mod rates;

pub use batch::handle_batch_command;
pub use config::handle_config_command;
pub use interactive::handle_interactive_command;
pub use rates::handle_rates_command;
