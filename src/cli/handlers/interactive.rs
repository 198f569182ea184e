//! Handler for the `interactive` command

use super::common::HandlerContext;
use crate::cli::output::OutputFormatter;
use crate::config::Config;
use crate::error::Result;
use crate::interactive::ParkingMenu;

/// Run the menu loop on a fresh ledger
///
/// All parked vehicles are forgotten when the session ends.
pub fn handle_interactive_command(
    config: &Config,
    seed: Option<u64>,
    formatter: OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(config, seed, None, formatter)?;
    tracing::debug!(total_slots = ctx.ledger.total_slots(), "starting interactive session");
    ParkingMenu::new(ctx).run()
}
