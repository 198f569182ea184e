//! A ledger handle for concurrent callers
//!
//! Each operation holds the lock for its whole duration, so two parks can
//! never both pass the capacity check and no update is lost.

use super::billing::Receipt;
use super::ledger::ParkingLedger;
use super::token::Token;
use super::vehicle::ParkedVehicle;
use crate::error::LedgerError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable, thread-safe handle to one [`ParkingLedger`]
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<ParkingLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: ParkingLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    // Ledger operations never panic midway, so a poisoned lock still
    // guards a consistent ledger.
    fn lock(&self) -> MutexGuard<'_, ParkingLedger> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn park(
        &self,
        owner_name: &str,
        phone: &str,
        plate_number: &str,
        vehicle_type_id: u32,
    ) -> Result<Token, LedgerError> {
        self.lock()
            .park(owner_name, phone, plate_number, vehicle_type_id)
    }

    pub fn remove(&self, token: &str) -> Result<Receipt, LedgerError> {
        self.lock().remove(token)
    }

    /// Owned snapshot of parked vehicles in arrival order; empty when none
    pub fn occupied(&self) -> Vec<ParkedVehicle> {
        self.lock()
            .occupied()
            .vehicles()
            .map(|vehicles| vehicles.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn remaining_slots(&self) -> (usize, usize) {
        self.lock().remaining_slots()
    }

    /// Run `f` with exclusive access to the ledger
    pub fn with<R>(&self, f: impl FnOnce(&mut ParkingLedger) -> R) -> R {
        f(&mut self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LedgerBuilder;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_concurrent_parks_respect_capacity() {
        let shared = SharedLedger::new(LedgerBuilder::new().total_slots(10).build().unwrap());

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    (0..5)
                        .filter_map(|i| {
                            shared
                                .park("Owner", "000", &format!("W{worker}-{i}"), 2)
                                .ok()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let tokens: Vec<Token> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(tokens.len(), 10);
        assert_eq!(tokens.iter().collect::<HashSet<_>>().len(), 10);
        assert_eq!(shared.remaining_slots(), (0, 10));
        assert_eq!(shared.occupied().len(), 10);
    }

    #[test]
    fn test_concurrent_duplicate_plate_admitted_once() {
        let shared = SharedLedger::new(LedgerBuilder::new().total_slots(10).build().unwrap());

        let handles: Vec<_> = (0..6)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.park("Owner", "000", "SAME", 1).is_ok())
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(admitted, 1);
    }

    #[test]
    fn test_shared_remove_and_snapshot() {
        let shared = SharedLedger::new(LedgerBuilder::new().total_slots(2).build().unwrap());
        assert!(shared.occupied().is_empty());

        let token = shared.park("A", "111", "KA01", 1).unwrap();
        assert_eq!(shared.occupied()[0].plate_number, "KA01");

        let receipt = shared.remove(token.as_str()).unwrap();
        assert_eq!(receipt.vehicle_type_name, "Car");
        assert!(matches!(
            shared.remove(token.as_str()),
            Err(LedgerError::InvalidToken { .. })
        ));
        assert_eq!(shared.with(|ledger| ledger.len()), 0);
    }
}
