use crate::cli::output::OutputFormatter;
use crate::config::{Config, UiSettings};
use crate::core::{LedgerBuilder, ManualClock, Occupancy, ParkingLedger, Receipt, Token};
use crate::error::{LedgerError, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Common context for the ledger-driving handlers
///
/// Owns the session's ledger and renders every operation's outcome. Ledger
/// rejections are printed and reported as `Ok(None)`; only output failures
/// are returned as errors.
pub struct HandlerContext {
    pub ledger: ParkingLedger,
    pub formatter: OutputFormatter,
    pub ui: UiSettings,
    manual_clock: Option<Arc<ManualClock>>,
}

impl HandlerContext {
    /// Build the session ledger from `config`
    pub fn new(
        config: &Config,
        seed: Option<u64>,
        manual_clock: Option<Arc<ManualClock>>,
        formatter: OutputFormatter,
    ) -> Result<Self> {
        let mut builder = LedgerBuilder::from_settings(&config.ledger).seed_opt(seed);
        if let Some(clock) = &manual_clock {
            builder = builder.clock(Arc::clone(clock));
        }

        Ok(Self {
            ledger: builder.build()?,
            formatter,
            ui: config.ui.clone(),
            manual_clock,
        })
    }

    /// The manual clock, when the session runs on one
    pub fn manual_clock(&self) -> Option<&ManualClock> {
        self.manual_clock.as_deref()
    }

    pub fn park(
        &mut self,
        owner_name: &str,
        phone: &str,
        plate_number: &str,
        vehicle_type_id: u32,
    ) -> Result<Option<Token>> {
        match self
            .ledger
            .park(owner_name, phone, plate_number, vehicle_type_id)
        {
            Ok(token) => {
                if self.formatter.is_json() {
                    self.formatter.print_json(&serde_json::json!({
                        "status": "success",
                        "action": "park",
                        "token": token,
                        "plate_number": plate_number,
                    }))?;
                } else {
                    self.formatter
                        .success(&format!("Vehicle parked successfully! Token: {token}"));
                    self.formatter
                        .info(&format!("Please keep your token safe: {token}"));
                }
                Ok(Some(token))
            },
            Err(e) => {
                self.rejected("park", &e)?;
                Ok(None)
            },
        }
    }

    pub fn remove(&mut self, token: &str) -> Result<Option<Receipt>> {
        match self.ledger.remove(token) {
            Ok(receipt) => {
                self.print_receipt(&receipt)?;
                Ok(Some(receipt))
            },
            Err(e) => {
                self.rejected("remove", &e)?;
                Ok(None)
            },
        }
    }

    fn print_receipt(&self, receipt: &Receipt) -> Result<()> {
        if self.formatter.is_json() {
            return self.formatter.print_json(&serde_json::json!({
                "status": "success",
                "action": "remove",
                "receipt": receipt,
            }));
        }

        let currency = &self.ui.currency_symbol;
        self.formatter.success("Vehicle removed successfully!");
        self.formatter.heading("PARKING RECEIPT");
        self.formatter.info(&format!("Name: {}", receipt.owner_name));
        self.formatter
            .info(&format!("Vehicle Number: {}", receipt.plate_number));
        self.formatter
            .info(&format!("Vehicle Type: {}", receipt.vehicle_type_name));
        self.formatter
            .info(&format!("Entry Time: {}", self.timestamp(&receipt.entered_at)));
        self.formatter
            .info(&format!("Exit Time: {}", self.timestamp(&receipt.exited_at)));
        self.formatter
            .info(&format!("Duration: {} hours", receipt.billable_hours));
        self.formatter
            .info(&format!("Total Cost: {currency}{}", receipt.total_cost));
        self.formatter
            .info("Thank you for using our parking service!");
        Ok(())
    }

    /// Print the parked vehicles table
    pub fn show_queue(&self) -> Result<()> {
        let occupancy = self.ledger.occupied();

        if self.formatter.is_json() {
            let vehicles: Vec<_> = occupancy
                .vehicles()
                .map(|v| v.iter().collect())
                .unwrap_or_default();
            return self.formatter.print_json(&serde_json::json!({
                "status": "success",
                "action": "list",
                "count": occupancy.len(),
                "vehicles": vehicles,
            }));
        }

        let Occupancy::Parked(vehicles) = occupancy else {
            self.formatter.info("No vehicles currently parked.");
            return Ok(());
        };

        let rule = "=".repeat(80);
        self.formatter.info(&rule);
        self.formatter.info(&format!(
            "{:<12} {:<15} {:<15} {:<10} {:<20}",
            "Token", "Name", "Vehicle No", "Type", "Entry Time"
        ));
        self.formatter.info(&rule);
        for vehicle in vehicles {
            self.formatter.info(&format!(
                "{:<12} {:<15} {:<15} {:<10} {:<20}",
                vehicle.token.as_str(),
                vehicle.owner_name,
                vehicle.plate_number,
                vehicle.vehicle_type_name,
                self.timestamp(&vehicle.entry_timestamp)
            ));
        }
        self.formatter.info(&rule);
        self.formatter
            .info(&format!("Total vehicles parked: {}", vehicles.len()));
        Ok(())
    }

    pub fn show_slots(&self) -> Result<()> {
        let (remaining, total) = self.ledger.remaining_slots();
        if self.formatter.is_json() {
            self.formatter.print_json(&serde_json::json!({
                "status": "success",
                "action": "slots",
                "remaining": remaining,
                "total": total,
            }))
        } else {
            self.formatter
                .info(&format!("Available slots: {remaining}/{total}"));
            Ok(())
        }
    }

    fn rejected(&self, action: &str, error: &LedgerError) -> Result<()> {
        if self.formatter.is_json() {
            self.formatter.print_json(&serde_json::json!({
                "status": "error",
                "action": action,
                "error": error.code(),
                "message": error.to_string(),
            }))
        } else {
            self.formatter.error(&error.to_string());
            Ok(())
        }
    }

    pub fn timestamp(&self, at: &DateTime<Utc>) -> String {
        at.with_timezone(&chrono::Local)
            .format(&self.ui.timestamp_format)
            .to_string()
    }
}
