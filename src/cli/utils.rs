use crate::error::{ParkingError, Result};
use chrono::Duration;

/// Parse a duration like "2h30m", "2h", "45m" or "90s"
///
/// A trailing number without a unit is taken as minutes.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let lowered = input.trim().to_lowercase();
    let invalid = || {
        ParkingError::invalid_input(format!(
            "Invalid duration: '{input}'. Use a format like '2h30m', '2h', '45m' or '90s'"
        ))
    };
    let out_of_range = || ParkingError::invalid_input(format!("Duration '{input}' is too large"));

    let mut total = Duration::zero();
    let mut current_num = String::new();
    let mut saw_number = false;

    for c in lowered.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
            continue;
        }
        if current_num.is_empty() {
            return Err(invalid());
        }
        // Only digits were collected, so a parse failure means overflow
        let value: i64 = current_num.parse().map_err(|_| out_of_range())?;
        let part = match c {
            'h' => Duration::try_hours(value),
            'm' => Duration::try_minutes(value),
            's' => Duration::try_seconds(value),
            _ => return Err(invalid()),
        };
        total = part
            .and_then(|part| total.checked_add(&part))
            .ok_or_else(out_of_range)?;
        current_num.clear();
        saw_number = true;
    }

    if !current_num.is_empty() {
        let minutes: i64 = current_num.parse().map_err(|_| out_of_range())?;
        total = Duration::try_minutes(minutes)
            .and_then(|part| total.checked_add(&part))
            .ok_or_else(out_of_range)?;
        saw_number = true;
    }

    if !saw_number {
        return Err(invalid());
    }
    Ok(total)
}

/// Format a duration as "1h 30m", "2h" or "45m"
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes().max(0);
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 && mins > 0 {
        format!("{hours}h {mins}m")
    } else if hours > 0 {
        format!("{hours}h")
    } else {
        format!("{mins}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("1h").unwrap(), Duration::hours(1));
        assert_eq!(parse_duration("30m").unwrap(), Duration::minutes(30));
        assert_eq!(parse_duration("2h30m").unwrap(), Duration::minutes(150));
        assert_eq!(parse_duration("90s").unwrap(), Duration::seconds(90));
        assert_eq!(parse_duration("45").unwrap(), Duration::minutes(45));
        assert_eq!(parse_duration("0m").unwrap(), Duration::zero());
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("2x").is_err());
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn test_parse_duration_rejects_out_of_range() {
        let inputs = [
            "9999999999999h",
            "99999999999999999999m",
            "9300000000000000s",
            "2000000000000h2000000000000h",
        ];
        for input in inputs {
            let err = parse_duration(input).unwrap_err();
            assert!(matches!(err, ParkingError::InvalidInput(_)), "{input}");
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(60)), "1h");
        assert_eq!(format_duration(Duration::minutes(30)), "30m");
        assert_eq!(format_duration(Duration::minutes(90)), "1h 30m");
        assert_eq!(format_duration(Duration::minutes(135)), "2h 15m");
    }
}
