//! Test utilities for parking-ledger
//!
//! Common fixtures so tests can build a ledger on a controllable clock
//! without repeating the builder chain.

#![cfg(test)]

use crate::core::{LedgerBuilder, ManualClock, ParkingLedger, Token};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Fixed start time so timestamps in assertions are predictable
pub fn test_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
        .single()
        .expect("valid start time")
}

/// Parse a decimal literal
pub fn dec(s: &str) -> Decimal {
    s.parse().expect("valid decimal literal")
}

/// A ledger wired to a manual clock
pub struct TestLedger {
    pub ledger: ParkingLedger,
    pub clock: Arc<ManualClock>,
    pub start: DateTime<Utc>,
}

impl TestLedger {
    /// Seeded ledger with `total_slots` slots and the standard catalog
    pub fn with_slots(total_slots: usize) -> Self {
        let start = test_start();
        let clock = Arc::new(ManualClock::new(start));
        let ledger = LedgerBuilder::new()
            .total_slots(total_slots)
            .clock(Arc::clone(&clock))
            .seed(0x5eed)
            .build()
            .expect("Failed to build test ledger");

        Self {
            ledger,
            clock,
            start,
        }
    }

    /// Park `count` cars with plates `CAR-0`, `CAR-1`, ...
    pub fn with_cars(total_slots: usize, count: usize) -> (Self, Vec<Token>) {
        let mut fixture = Self::with_slots(total_slots);
        let tokens = (0..count)
            .map(|i| {
                fixture
                    .ledger
                    .park(&format!("Owner {i}"), "0000000000", &format!("CAR-{i}"), 1)
                    .expect("Failed to park test car")
            })
            .collect();
        (fixture, tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_uses_manual_clock() {
        let fixture = TestLedger::with_slots(4);
        assert_eq!(fixture.ledger.remaining_slots(), (4, 4));
        assert_eq!(fixture.start, test_start());
    }

    #[test]
    fn test_fixture_with_cars() {
        let (fixture, tokens) = TestLedger::with_cars(4, 3);
        assert_eq!(tokens.len(), 3);
        assert_eq!(fixture.ledger.remaining_slots(), (1, 4));
        assert_eq!(
            fixture.ledger.find_by_plate("CAR-2").map(|v| &v.token),
            Some(&tokens[2])
        );
    }
}
