//! Handler for the `batch` command
//!
//! Runs a line-oriented script against a fresh ledger, one command per
//! line. Lines that are blank or start with `#` are skipped.

use super::common::HandlerContext;
use crate::cli::output::OutputFormatter;
use crate::cli::utils::{format_duration, parse_duration};
use crate::config::Config;
use crate::core::{ManualClock, Token};
use crate::error::{ParkingError, Result};
use chrono::Duration;
use std::path::Path;
use std::sync::Arc;
use std::{fs, io};

/// A token given literally or by the order it was issued in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenRef {
    Literal(String),
    /// `#N`, the token from the N-th successful park (1-based)
    Issued(usize),
}

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchCommand {
    Park {
        owner_name: String,
        phone: String,
        plate_number: String,
        vehicle_type_id: u32,
    },
    Remove(TokenRef),
    List,
    Slots,
    Advance(Duration),
    Exit,
}

impl BatchCommand {
    /// Parse a script line; `Ok(None)` for blank and comment lines
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let (command, args) = words
            .split_first()
            .ok_or_else(|| ParkingError::invalid_input("Empty command"))?;

        let parsed = match (command.to_lowercase().as_str(), args) {
            ("park", args) => Self::parse_park(args)?,
            ("remove", [token]) => Self::Remove(Self::parse_token_ref(token)?),
            ("list" | "queue", []) => Self::List,
            ("slots", []) => Self::Slots,
            ("advance", [duration]) => Self::Advance(parse_duration(duration)?),
            ("exit" | "quit", []) => Self::Exit,
            ("remove", _) => return Err(ParkingError::invalid_input("Usage: remove <token|#N>")),
            ("advance", _) => {
                return Err(ParkingError::invalid_input("Usage: advance <duration>"));
            },
            (other @ ("list" | "queue" | "slots" | "exit" | "quit"), _) => {
                return Err(ParkingError::invalid_input(format!(
                    "'{other}' takes no arguments"
                )));
            },
            (other, _) => {
                return Err(ParkingError::invalid_input(format!(
                    "Unknown command '{other}'. Valid commands: park, remove, list, slots, advance, exit"
                )));
            },
        };
        Ok(Some(parsed))
    }

    // The last three words are phone, plate and type id; the rest is the name
    fn parse_park(args: &[&str]) -> Result<Self> {
        let usage = || ParkingError::invalid_input("Usage: park <name...> <phone> <plate> <type-id>");
        if args.len() < 4 {
            return Err(usage());
        }
        let (name, rest) = args.split_at(args.len() - 3);
        let [phone, plate, type_id] = rest else {
            return Err(usage());
        };

        let vehicle_type_id = type_id.parse::<u32>().map_err(|_| {
            if type_id.chars().all(|c| c.is_ascii_digit()) {
                ParkingError::invalid_input(format!("Unknown vehicle type: {type_id}"))
            } else {
                ParkingError::invalid_input(format!(
                    "Invalid vehicle type '{type_id}'. Please enter a number."
                ))
            }
        })?;

        Ok(Self::Park {
            owner_name: name.join(" "),
            phone: (*phone).to_string(),
            plate_number: (*plate).to_string(),
            vehicle_type_id,
        })
    }

    fn parse_token_ref(token: &str) -> Result<TokenRef> {
        match token.strip_prefix('#') {
            Some(index) => match index.parse::<usize>() {
                Ok(n) if n > 0 => Ok(TokenRef::Issued(n)),
                _ => Err(ParkingError::invalid_input(format!(
                    "Invalid token reference '{token}'. Use #1 for the first issued token"
                ))),
            },
            None => Ok(TokenRef::Literal(token.to_string())),
        }
    }
}

/// Handle the `batch` command
///
/// Ledger rejections and malformed lines are reported and the script
/// carries on.
///
/// # Errors
///
/// Returns an error if the script cannot be read, the ledger cannot be
/// built from `config`, or output fails.
pub fn handle_batch_command(
    file: Option<&Path>,
    manual_clock: bool,
    config: &Config,
    seed: Option<u64>,
    formatter: OutputFormatter,
) -> Result<()> {
    let script = match file {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };

    let clock = manual_clock.then(|| Arc::new(ManualClock::starting_now()));
    let mut ctx = HandlerContext::new(config, seed, clock, formatter)?;
    let mut runner = BatchRunner::default();

    for (index, line) in script.lines().enumerate() {
        let line_number = index + 1;
        let command = match BatchCommand::parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                report_input_error(&ctx, line_number, &e)?;
                continue;
            },
        };

        if command == BatchCommand::Exit {
            break;
        }
        if let Err(e) = runner.execute(&mut ctx, command) {
            if !e.is_recoverable() {
                return Err(e);
            }
            report_input_error(&ctx, line_number, &e)?;
        }
    }

    tracing::info!(
        issued = runner.issued.len(),
        parked = ctx.ledger.len(),
        "batch finished"
    );
    Ok(())
}

#[derive(Default)]
struct BatchRunner {
    issued: Vec<Token>,
}

impl BatchRunner {
    fn execute(&mut self, ctx: &mut HandlerContext, command: BatchCommand) -> Result<()> {
        match command {
            BatchCommand::Park {
                owner_name,
                phone,
                plate_number,
                vehicle_type_id,
            } => {
                if let Some(token) = ctx.park(&owner_name, &phone, &plate_number, vehicle_type_id)? {
                    self.issued.push(token);
                }
            },
            BatchCommand::Remove(token_ref) => {
                let token = self.resolve(&token_ref)?;
                ctx.remove(&token)?;
            },
            BatchCommand::List => ctx.show_queue()?,
            BatchCommand::Slots => ctx.show_slots()?,
            BatchCommand::Advance(by) => {
                let clock = ctx.manual_clock().ok_or_else(|| {
                    ParkingError::invalid_input("'advance' needs the --manual-clock flag")
                })?;
                clock.advance(by).ok_or_else(|| {
                    ParkingError::invalid_input(format!(
                        "Cannot advance the clock by {}: date out of range",
                        format_duration(by)
                    ))
                })?;
                if ctx.formatter.is_json() {
                    ctx.formatter.print_json(&serde_json::json!({
                        "status": "success",
                        "action": "advance",
                        "minutes": by.num_minutes(),
                    }))?;
                } else {
                    ctx.formatter
                        .info(&format!("Clock advanced by {}", format_duration(by)));
                }
            },
            BatchCommand::Exit => {},
        }
        Ok(())
    }

    fn resolve(&self, token_ref: &TokenRef) -> Result<String> {
        match token_ref {
            TokenRef::Literal(token) => Ok(token.clone()),
            TokenRef::Issued(n) => self
                .issued
                .get(n - 1)
                .map(|token| token.as_str().to_string())
                .ok_or_else(|| {
                    ParkingError::invalid_input(format!(
                        "#{n} does not refer to an issued token ({} issued so far)",
                        self.issued.len()
                    ))
                }),
        }
    }
}

fn report_input_error(ctx: &HandlerContext, line: usize, error: &ParkingError) -> Result<()> {
    if ctx.formatter.is_json() {
        ctx.formatter.print_json(&serde_json::json!({
            "status": "error",
            "action": "input",
            "line": line,
            "message": error.user_message(),
        }))
    } else {
        ctx.formatter
            .error(&format!("line {line}: {}", error.user_message()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Clock;

    fn parse(line: &str) -> BatchCommand {
        BatchCommand::parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_park_with_multi_word_name() {
        assert_eq!(
            parse("park Anita Rao 9876543210 KA01AB1234 1"),
            BatchCommand::Park {
                owner_name: "Anita Rao".to_string(),
                phone: "9876543210".to_string(),
                plate_number: "KA01AB1234".to_string(),
                vehicle_type_id: 1,
            }
        );
    }

    #[test]
    fn test_parse_park_errors() {
        assert!(BatchCommand::parse_line("park A 111 KA01").is_err());
        assert!(BatchCommand::parse_line("park A 111 KA01 car").is_err());
        // Out-of-catalog ids parse; the ledger rejects them
        assert!(BatchCommand::parse_line("park A 111 KA01 9").is_ok());
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(
            parse("remove 123456ABC"),
            BatchCommand::Remove(TokenRef::Literal("123456ABC".to_string()))
        );
        assert_eq!(parse("REMOVE #2"), BatchCommand::Remove(TokenRef::Issued(2)));
        assert_eq!(parse("list"), BatchCommand::List);
        assert_eq!(parse("queue"), BatchCommand::List);
        assert_eq!(parse("slots"), BatchCommand::Slots);
        assert_eq!(parse("advance 2h30m"), BatchCommand::Advance(Duration::minutes(150)));
        assert_eq!(parse("exit"), BatchCommand::Exit);
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert!(BatchCommand::parse_line("").unwrap().is_none());
        assert!(BatchCommand::parse_line("   ").unwrap().is_none());
        assert!(BatchCommand::parse_line("# park A 1 2 3").unwrap().is_none());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(BatchCommand::parse_line("remove").is_err());
        assert!(BatchCommand::parse_line("remove #0").is_err());
        assert!(BatchCommand::parse_line("slots now").is_err());
        assert!(BatchCommand::parse_line("fly away").is_err());
    }

    #[test]
    fn test_runner_resolves_issued_tokens() {
        let mut config = Config::default();
        config.ledger.total_slots = 2;
        let mut ctx = HandlerContext::new(
            &config,
            Some(1),
            Some(Arc::new(ManualClock::starting_now())),
            OutputFormatter::new(false, true),
        )
        .unwrap();
        let mut runner = BatchRunner::default();

        runner.execute(&mut ctx, parse("park A 111 KA01 1")).unwrap();
        assert_eq!(runner.issued.len(), 1);

        let err = runner.execute(&mut ctx, parse("remove #2")).unwrap_err();
        assert!(err.is_recoverable());

        runner.execute(&mut ctx, parse("advance 3h")).unwrap();
        runner.execute(&mut ctx, parse("remove #1")).unwrap();
        assert!(ctx.ledger.is_empty());
    }

    #[test]
    fn test_advance_past_date_range_is_input_error() {
        let clock = Arc::new(ManualClock::starting_now());
        let before = clock.now();
        let mut ctx = HandlerContext::new(
            &Config::default(),
            None,
            Some(Arc::clone(&clock)),
            OutputFormatter::new(false, true),
        )
        .unwrap();

        let err = BatchRunner::default()
            .execute(&mut ctx, parse("advance 2500000000h"))
            .unwrap_err();
        assert!(matches!(err, ParkingError::InvalidInput(_)));
        assert_eq!(clock.now(), before);
    }

    #[test]
    fn test_parse_oversized_durations_and_type_ids() {
        let err = BatchCommand::parse_line("advance 9999999999999h").unwrap_err();
        assert!(matches!(err, ParkingError::InvalidInput(_)));

        assert_eq!(
            parse("park A 111 KA01 300"),
            BatchCommand::Park {
                owner_name: "A".to_string(),
                phone: "111".to_string(),
                plate_number: "KA01".to_string(),
                vehicle_type_id: 300,
            }
        );
        let mut ctx = HandlerContext::new(
            &Config::default(),
            None,
            None,
            OutputFormatter::new(false, true),
        )
        .unwrap();
        let mut runner = BatchRunner::default();
        runner.execute(&mut ctx, parse("park A 111 KA01 300")).unwrap();
        assert!(runner.issued.is_empty());
        assert!(ctx.ledger.is_empty());

        let err = BatchCommand::parse_line("park A 111 KA01 99999999999").unwrap_err();
        assert!(err.user_message().contains("Unknown vehicle type"));
    }

    #[test]
    fn test_advance_needs_manual_clock() {
        let mut ctx = HandlerContext::new(
            &Config::default(),
            None,
            None,
            OutputFormatter::new(false, true),
        )
        .unwrap();
        let err = BatchRunner::default()
            .execute(&mut ctx, parse("advance 1h"))
            .unwrap_err();
        assert!(matches!(err, ParkingError::InvalidInput(_)));
    }
}
