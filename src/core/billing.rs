//! Exit fee calculation
//!
//! Stays shorter than [`MINIMUM_BILLABLE_HOURS`] are billed as the minimum.
//! Longer stays are billed for the exact elapsed time, not rounded up to
//! whole hours.

use super::Token;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub const MINIMUM_BILLABLE_HOURS: Decimal = Decimal::ONE;

/// Decimal places used when reporting hours and amounts
pub const REPORTING_SCALE: u32 = 2;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Hours to bill for a stay of `elapsed`
///
/// A negative duration (clock moved backwards) bills the minimum.
pub fn billable_hours(elapsed: Duration) -> Decimal {
    let millis = elapsed.num_milliseconds().max(0);
    let hours = Decimal::from(millis) / Decimal::from(MILLIS_PER_HOUR);
    hours.max(MINIMUM_BILLABLE_HOURS)
}

/// Round to the reporting scale and pin the scale so `75` prints as `75.00`
fn to_reporting_scale(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(REPORTING_SCALE);
    rounded.rescale(REPORTING_SCALE);
    rounded
}

/// Billed hours and amount for one stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fee {
    pub billable_hours: Decimal,
    pub total_cost: Decimal,
}

impl Fee {
    /// The cost is computed from unrounded hours; both figures are then rounded
    pub fn compute(elapsed: Duration, rate_per_hour: Decimal) -> Self {
        let hours = billable_hours(elapsed);
        Self {
            billable_hours: to_reporting_scale(hours),
            total_cost: to_reporting_scale(hours * rate_per_hour),
        }
    }
}

/// Issued when a vehicle leaves
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub token: Token,
    pub plate_number: String,
    pub owner_name: String,
    pub vehicle_type_name: String,
    pub rate_per_hour: Decimal,
    pub entered_at: DateTime<Utc>,
    pub exited_at: DateTime<Utc>,
    pub billable_hours: Decimal,
    pub total_cost: Decimal,
}
