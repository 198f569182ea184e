//! The parking ledger
//!
//! Holds every vehicle currently parked, keyed by token, in the order they
//! arrived. The ledger is an ordinary owned value: build one with
//! [`crate::core::LedgerBuilder`], keep it for as long as the session runs.

use super::billing::{Fee, Receipt};
use super::builders::ParkedVehicleBuilder;
use super::clock::Clock;
use super::token::{Token, TokenGenerator};
use super::vehicle::{ParkedVehicle, VehicleTypeCatalog};
use crate::error::LedgerError;
use indexmap::IndexMap;
use indexmap::map::Values;
use std::fmt;
use std::sync::Arc;

/// In-memory record of parked vehicles
pub struct ParkingLedger {
    total_slots: usize,
    catalog: VehicleTypeCatalog,
    occupied: IndexMap<Token, ParkedVehicle>,
    tokens: TokenGenerator,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for ParkingLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParkingLedger")
            .field("total_slots", &self.total_slots)
            .field("occupied", &self.occupied.len())
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl ParkingLedger {
    /// Start building a ledger
    pub fn builder() -> super::LedgerBuilder {
        super::LedgerBuilder::new()
    }

    /// Callers must have validated `total_slots > 0` and that the token
    /// space can hold `total_slots` tokens.
    pub(crate) fn from_parts(
        total_slots: usize,
        catalog: VehicleTypeCatalog,
        tokens: TokenGenerator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            total_slots,
            catalog,
            occupied: IndexMap::with_capacity(total_slots.min(1024)),
            tokens,
            clock,
        }
    }

    /// Admit a vehicle and return its token
    ///
    /// # Errors
    ///
    /// - [`LedgerError::CapacityExceeded`] when every slot is taken
    /// - [`LedgerError::DuplicateVehicle`] when the plate is already parked
    /// - [`LedgerError::UnknownVehicleType`] when the type id is not in the catalog
    ///
    /// The ledger is unchanged on error.
    pub fn park(
        &mut self,
        owner_name: &str,
        phone: &str,
        plate_number: &str,
        vehicle_type_id: u32,
    ) -> Result<Token, LedgerError> {
        if self.occupied.len() >= self.total_slots {
            tracing::warn!(total_slots = self.total_slots, "park rejected: ledger full");
            return Err(LedgerError::CapacityExceeded {
                total_slots: self.total_slots,
            });
        }

        if self.find_by_plate(plate_number).is_some() {
            tracing::warn!(plate = plate_number, "park rejected: vehicle already parked");
            return Err(LedgerError::DuplicateVehicle {
                plate_number: plate_number.to_string(),
            });
        }

        let vehicle_type = self.catalog.lookup(vehicle_type_id)?;

        let occupied = &self.occupied;
        let token = self
            .tokens
            .generate(|candidate| occupied.contains_key(candidate))
            .ok_or(LedgerError::CapacityExceeded {
                total_slots: self.total_slots,
            })?;

        let vehicle = ParkedVehicleBuilder::new(token.clone())
            .owner_name(owner_name)
            .phone(phone)
            .plate_number(plate_number)
            .vehicle_type(vehicle_type)
            .entered_at(self.clock.now())
            .build();

        tracing::info!(
            token = %token,
            plate = plate_number,
            vehicle_type = %vehicle.vehicle_type_name,
            "vehicle parked"
        );
        self.occupied.insert(token.clone(), vehicle);

        Ok(token)
    }

    /// Release the vehicle holding `token` and bill its stay
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidToken`] when no parked vehicle holds the token.
    pub fn remove(&mut self, token: &str) -> Result<Receipt, LedgerError> {
        let Some(vehicle) = self.occupied.shift_remove(token) else {
            tracing::warn!(token, "remove rejected: unknown token");
            return Err(LedgerError::InvalidToken {
                token: token.to_string(),
            });
        };

        let exited_at = self.clock.now();
        let fee = Fee::compute(exited_at - vehicle.entry_timestamp, vehicle.rate_per_hour);

        tracing::info!(
            token,
            plate = %vehicle.plate_number,
            hours = %fee.billable_hours,
            cost = %fee.total_cost,
            "vehicle removed"
        );

        Ok(Receipt {
            token: vehicle.token,
            plate_number: vehicle.plate_number,
            owner_name: vehicle.owner_name,
            vehicle_type_name: vehicle.vehicle_type_name,
            rate_per_hour: vehicle.rate_per_hour,
            entered_at: vehicle.entry_timestamp,
            exited_at,
            billable_hours: fee.billable_hours,
            total_cost: fee.total_cost,
        })
    }

    /// Vehicles currently parked, in arrival order
    pub fn occupied(&self) -> Occupancy<'_> {
        if self.occupied.is_empty() {
            Occupancy::Empty
        } else {
            Occupancy::Parked(ParkedVehicles {
                entries: &self.occupied,
            })
        }
    }

    /// `(free slots, total slots)`
    pub fn remaining_slots(&self) -> (usize, usize) {
        (self.total_slots - self.occupied.len(), self.total_slots)
    }

    pub fn get(&self, token: &str) -> Option<&ParkedVehicle> {
        self.occupied.get(token)
    }

    pub fn find_by_plate(&self, plate_number: &str) -> Option<&ParkedVehicle> {
        self.occupied
            .values()
            .find(|v| v.plate_number == plate_number)
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    pub const fn total_slots(&self) -> usize {
        self.total_slots
    }

    pub const fn catalog(&self) -> &VehicleTypeCatalog {
        &self.catalog
    }
}

/// Result of listing the ledger
#[derive(Debug, Clone, Copy)]
pub enum Occupancy<'a> {
    /// Nothing is parked
    Empty,
    Parked(ParkedVehicles<'a>),
}

impl<'a> Occupancy<'a> {
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Parked(vehicles) => vehicles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn vehicles(self) -> Option<ParkedVehicles<'a>> {
        match self {
            Self::Empty => None,
            Self::Parked(vehicles) => Some(vehicles),
        }
    }
}

/// Borrowed, re-iterable view of parked vehicles in arrival order
#[derive(Debug, Clone, Copy)]
pub struct ParkedVehicles<'a> {
    entries: &'a IndexMap<Token, ParkedVehicle>,
}

impl<'a> ParkedVehicles<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Values<'a, Token, ParkedVehicle> {
        self.entries.values()
    }
}

impl<'a> IntoIterator for ParkedVehicles<'a> {
    type Item = &'a ParkedVehicle;
    type IntoIter = Values<'a, Token, ParkedVehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
