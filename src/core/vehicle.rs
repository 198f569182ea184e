use super::Token;
use crate::error::LedgerError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A kind of vehicle and its hourly fare
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleType {
    pub id: u8,
    pub name: String,
    pub rate_per_hour: Decimal,
}

impl VehicleType {
    pub fn new(id: u8, name: impl Into<String>, rate_per_hour: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            rate_per_hour,
        }
    }
}

/// Fixed table of vehicle types, read-only once the ledger is built
///
/// Ids 1 through 5 are always present and every rate is non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleTypeCatalog {
    types: Vec<VehicleType>,
}

impl VehicleTypeCatalog {
    /// The standard rate card
    pub fn standard() -> Self {
        Self {
            types: vec![
                VehicleType::new(1, "Car", Decimal::from(30)),
                VehicleType::new(2, "Bike", Decimal::from(20)),
                VehicleType::new(3, "Scooty", Decimal::from(20)),
                VehicleType::new(4, "Jeep", Decimal::from(25)),
                VehicleType::new(5, "Bus", Decimal::from(40)),
            ],
        }
    }

    /// Look up a vehicle type by id
    pub fn lookup(&self, id: u32) -> Result<&VehicleType, LedgerError> {
        self.types
            .iter()
            .find(|t| u32::from(t.id) == id)
            .ok_or(LedgerError::UnknownVehicleType { id })
    }

    /// All types in id order
    pub fn iter(&self) -> impl Iterator<Item = &VehicleType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for VehicleTypeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// A vehicle currently occupying a slot
///
/// Type name and rate are copied from the catalog at park time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParkedVehicle {
    pub token: Token,
    pub owner_name: String,
    pub phone: String,
    pub plate_number: String,
    pub vehicle_type_name: String,
    pub rate_per_hour: Decimal,
    pub entry_timestamp: DateTime<Utc>,
}
