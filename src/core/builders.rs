use super::clock::{Clock, SystemClock};
use super::token::{DEFAULT_MAX_RANDOM_DRAWS, Token, TokenFormat, TokenGenerator};
use super::{ParkedVehicle, ParkingLedger, VehicleType, VehicleTypeCatalog};
use crate::config::LedgerSettings;
use crate::error::{ParkingError, Result};
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Capacity used when none is given
pub const DEFAULT_TOTAL_SLOTS: usize = 100;

/// Builder for creating [`ParkingLedger`] instances
#[derive(Default)]
pub struct LedgerBuilder {
    total_slots: Option<usize>,
    catalog: Option<VehicleTypeCatalog>,
    token_format: Option<TokenFormat>,
    max_random_draws: Option<u32>,
    clock: Option<Arc<dyn Clock>>,
    seed: Option<u64>,
}

impl LedgerBuilder {
    /// Create a new ledger builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder from the `[ledger]` config section
    #[must_use]
    pub fn from_settings(settings: &LedgerSettings) -> Self {
        Self::new()
            .total_slots(settings.total_slots)
            .token_format(settings.token.clone())
            .max_random_draws(settings.max_random_draws)
    }

    /// Set the number of slots
    #[must_use]
    pub const fn total_slots(mut self, total_slots: usize) -> Self {
        self.total_slots = Some(total_slots);
        self
    }

    /// Set the vehicle type catalog
    #[must_use]
    pub fn catalog(mut self, catalog: VehicleTypeCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the token format
    #[must_use]
    pub fn token_format(mut self, format: TokenFormat) -> Self {
        self.token_format = Some(format);
        self
    }

    /// Set how many random draws to try before sweeping the token space
    #[must_use]
    pub const fn max_random_draws(mut self, draws: u32) -> Self {
        self.max_random_draws = Some(draws);
        self
    }

    /// Set the time source
    #[must_use]
    pub fn clock<C: Clock + 'static>(mut self, clock: Arc<C>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Make token generation deterministic
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set an optional seed
    #[must_use]
    pub const fn seed_opt(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Build the ledger
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::InvalidConfig`] when the capacity is zero, the
    /// token format is invalid, or the token space is smaller than the
    /// capacity.
    pub fn build(self) -> Result<ParkingLedger> {
        let total_slots = self.total_slots.unwrap_or(DEFAULT_TOTAL_SLOTS);
        if total_slots == 0 {
            return Err(ParkingError::invalid_config(
                "total_slots must be greater than zero",
            ));
        }

        let format = self.token_format.unwrap_or_default();
        format.validate()?;
        format.ensure_room_for(total_slots)?;

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let tokens = TokenGenerator::new(
            format,
            rng,
            self.max_random_draws.unwrap_or(DEFAULT_MAX_RANDOM_DRAWS),
        );
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        tracing::debug!(total_slots, "ledger built");
        Ok(ParkingLedger::from_parts(
            total_slots,
            self.catalog.unwrap_or_default(),
            tokens,
            clock,
        ))
    }
}

/// Builder for creating [`ParkedVehicle`] records
pub struct ParkedVehicleBuilder {
    token: Token,
    owner_name: Option<String>,
    phone: Option<String>,
    plate_number: Option<String>,
    vehicle_type_name: Option<String>,
    rate_per_hour: Option<Decimal>,
    entry_timestamp: Option<DateTime<Utc>>,
}

impl ParkedVehicleBuilder {
    /// Start a record for the vehicle holding `token`
    #[must_use]
    pub const fn new(token: Token) -> Self {
        Self {
            token,
            owner_name: None,
            phone: None,
            plate_number: None,
            vehicle_type_name: None,
            rate_per_hour: None,
            entry_timestamp: None,
        }
    }

    /// Set the owner name
    #[must_use]
    pub fn owner_name(mut self, owner_name: impl Into<String>) -> Self {
        self.owner_name = Some(owner_name.into());
        self
    }

    /// Set the phone number
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the plate number
    #[must_use]
    pub fn plate_number(mut self, plate_number: impl Into<String>) -> Self {
        self.plate_number = Some(plate_number.into());
        self
    }

    /// Copy the type name and hourly rate from a catalog entry
    #[must_use]
    pub fn vehicle_type(mut self, vehicle_type: &VehicleType) -> Self {
        self.vehicle_type_name = Some(vehicle_type.name.clone());
        self.rate_per_hour = Some(vehicle_type.rate_per_hour);
        self
    }

    /// Set the entry timestamp
    #[must_use]
    pub const fn entered_at(mut self, entered_at: DateTime<Utc>) -> Self {
        self.entry_timestamp = Some(entered_at);
        self
    }

    /// Build the record
    pub fn build(self) -> ParkedVehicle {
        ParkedVehicle {
            token: self.token,
            owner_name: self.owner_name.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            plate_number: self.plate_number.unwrap_or_default(),
            vehicle_type_name: self.vehicle_type_name.unwrap_or_default(),
            rate_per_hour: self.rate_per_hour.unwrap_or_default(),
            entry_timestamp: self.entry_timestamp.unwrap_or_else(Utc::now),
        }
    }
}
