//! Interactive mode for parking-ledger
//!
//! A menu loop over the four ledger operations. Every outcome, including a
//! rejected park or an unknown token, is printed and the loop continues
//! until the user exits or interrupts.

use crate::cli::handlers::common::HandlerContext;
use crate::cli::handlers::rates::rate_line;
use crate::error::{ParkingError, Result};
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::io;

/// Top-level menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Park,
    Remove,
    Queue,
    RemainingSlots,
    Exit,
}

impl MenuOption {
    pub const ALL: [Self; 5] = [
        Self::Park,
        Self::Remove,
        Self::Queue,
        Self::RemainingSlots,
        Self::Exit,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Park => "1. Park the vehicle",
            Self::Remove => "2. Remove the vehicle",
            Self::Queue => "3. See the queue",
            Self::RemainingSlots => "4. Remaining slots",
            Self::Exit => "5. Exit",
        }
    }
}

/// The interactive parking session
pub struct ParkingMenu {
    theme: ColorfulTheme,
    ctx: HandlerContext,
}

impl ParkingMenu {
    pub fn new(ctx: HandlerContext) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            ctx,
        }
    }

    /// Run until the user picks Exit, presses Esc, or interrupts
    pub fn run(&mut self) -> Result<()> {
        let labels: Vec<&str> = MenuOption::ALL.iter().map(|o| o.label()).collect();

        loop {
            self.banner();
            let selection = Select::with_theme(&self.theme)
                .with_prompt("Enter your option")
                .items(&labels)
                .default(0)
                .interact_opt();

            let option = match selection {
                Ok(Some(index)) => MenuOption::ALL[index],
                Ok(None) => MenuOption::Exit,
                Err(e) if is_interrupt(&e) => return self.interrupted(),
                Err(e) => return Err(e.into()),
            };

            let outcome = match option {
                MenuOption::Park => self.park(),
                MenuOption::Remove => self.remove(),
                MenuOption::Queue => {
                    self.ctx.formatter.heading("CURRENT PARKED VEHICLES");
                    self.ctx.show_queue()
                },
                MenuOption::RemainingSlots => {
                    self.ctx.formatter.heading("PARKING AVAILABILITY");
                    self.ctx.show_slots()
                },
                MenuOption::Exit => {
                    self.ctx
                        .formatter
                        .info("\nThank you for using Vehicle Parking Management System!");
                    self.ctx.formatter.info("Goodbye! 👋");
                    return Ok(());
                },
            };

            match outcome {
                Ok(()) => {},
                Err(ParkingError::Dialog(e)) if is_interrupt(&e) => return self.interrupted(),
                Err(e) if e.is_recoverable() => self.ctx.formatter.error(&e.user_message()),
                Err(e) => return Err(e),
            }
        }
    }

    fn banner(&self) {
        let rule = "=".repeat(50);
        self.ctx.formatter.info(&format!("\n{rule}"));
        self.ctx
            .formatter
            .info("------Welcome to Vehicle Parking Management------");
        self.ctx.formatter.info(&rule);
    }

    fn park(&mut self) -> Result<()> {
        self.ctx.formatter.heading("PARK VEHICLE");

        let owner_name = self.prompt("Enter your name")?;
        let phone = self.prompt("Enter your phone number")?;

        let currency = &self.ctx.ui.currency_symbol;
        let types: Vec<(u8, String)> = self
            .ctx
            .ledger
            .catalog()
            .iter()
            .map(|t| (t.id, rate_line(t.id, &t.name, &t.rate_per_hour, currency)))
            .collect();
        let labels: Vec<&str> = types.iter().map(|(_, label)| label.as_str()).collect();

        let Some(index) = Select::with_theme(&self.theme)
            .with_prompt("Vehicle Types and Pricing")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            self.ctx.formatter.info("Cancelled");
            return Ok(());
        };

        let plate_number = self.prompt("Enter the vehicle number")?;

        self.ctx
            .park(&owner_name, &phone, &plate_number, u32::from(types[index].0))?;
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        self.ctx.formatter.heading("REMOVE VEHICLE");
        let token = self.prompt("Enter your token number")?;
        self.ctx.remove(&token)?;
        Ok(())
    }

    // Free-form; empty answers are recorded as given
    fn prompt(&self, label: &str) -> Result<String> {
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    fn interrupted(&self) -> Result<()> {
        self.ctx
            .formatter
            .info("\n\nProgram interrupted by user. Goodbye!");
        Ok(())
    }
}

/// Only seen when the terminal hands Ctrl-C to the prompt as input; with
/// default signal handling the process is terminated before this point.
fn is_interrupt(error: &dialoguer::Error) -> bool {
    matches!(error, dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_labels_are_numbered() {
        for (index, option) in MenuOption::ALL.iter().enumerate() {
            assert!(option.label().starts_with(&format!("{}. ", index + 1)));
        }
    }

    #[test]
    fn test_interrupt_detection() {
        let interrupted = dialoguer::Error::IO(io::Error::from(io::ErrorKind::Interrupted));
        assert!(is_interrupt(&interrupted));

        let other = dialoguer::Error::IO(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(!is_interrupt(&other));
    }
}
