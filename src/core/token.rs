//! Parking tokens
//!
//! A token is a random decimal numeral of fixed width followed by a
//! fixed alphabetic tag, e.g. `482913ABC`.

use crate::error::{ParkingError, Result};
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Largest supported numeral width; `10^18` still fits in a `u64`
pub const MAX_TOKEN_DIGITS: u32 = 18;

/// Default number of random draws before sweeping the token space
pub const DEFAULT_MAX_RANDOM_DRAWS: u32 = 1024;

/// Identifier issued at park time and required to remove the vehicle
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Shape of generated tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenFormat {
    /// Width of the random numeral
    pub digits: u32,
    /// Tag appended after the numeral
    pub suffix: String,
}

impl Default for TokenFormat {
    fn default() -> Self {
        Self {
            digits: 6,
            suffix: "ABC".to_string(),
        }
    }
}

impl TokenFormat {
    pub fn new(digits: u32, suffix: impl Into<String>) -> Self {
        Self {
            digits,
            suffix: suffix.into(),
        }
    }

    /// Check the width and tag
    pub fn validate(&self) -> Result<()> {
        if self.digits == 0 || self.digits > MAX_TOKEN_DIGITS {
            return Err(ParkingError::invalid_config(format!(
                "token digits must be between 1 and {MAX_TOKEN_DIGITS}, got {}",
                self.digits
            )));
        }
        if self.suffix.is_empty() || !self.suffix.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ParkingError::invalid_config(format!(
                "token suffix must be non-empty ASCII letters, got '{}'",
                self.suffix
            )));
        }
        Ok(())
    }

    /// Smallest numeral with the configured width
    pub fn lowest(&self) -> u64 {
        10u64.pow(self.digits - 1)
    }

    /// Largest numeral with the configured width
    pub fn highest(&self) -> u64 {
        10u64.pow(self.digits) - 1
    }

    /// Number of distinct tokens this format can produce
    pub fn space_size(&self) -> u64 {
        self.highest() - self.lowest() + 1
    }

    /// Check that `total_slots` vehicles can all hold distinct tokens
    pub fn ensure_room_for(&self, total_slots: usize) -> Result<()> {
        if u64::try_from(total_slots).map_or(true, |slots| slots > self.space_size()) {
            return Err(ParkingError::invalid_config(format!(
                "{total_slots} slots cannot all hold distinct tokens: a {}-digit token space has {} values",
                self.digits,
                self.space_size()
            )));
        }
        Ok(())
    }

    fn render(&self, numeral: u64) -> Token {
        Token::new(format!("{numeral}{}", self.suffix))
    }
}

/// Draws tokens that do not collide with the ones currently in use
pub struct TokenGenerator {
    format: TokenFormat,
    rng: StdRng,
    max_random_draws: u32,
}

impl fmt::Debug for TokenGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGenerator")
            .field("format", &self.format)
            .field("max_random_draws", &self.max_random_draws)
            .finish_non_exhaustive()
    }
}

impl TokenGenerator {
    /// The format must already be validated
    pub fn new(format: TokenFormat, rng: StdRng, max_random_draws: u32) -> Self {
        Self {
            format,
            rng,
            max_random_draws,
        }
    }

    pub const fn format(&self) -> &TokenFormat {
        &self.format
    }

    /// Generate a token for which `is_taken` returns false
    ///
    /// Tries up to `max_random_draws` random numerals, then walks the whole
    /// space from a random offset. Returns `None` only when every token in
    /// the space is taken.
    pub fn generate<F>(&mut self, is_taken: F) -> Option<Token>
    where
        F: Fn(&str) -> bool,
    {
        let (low, high) = (self.format.lowest(), self.format.highest());

        for attempt in 0..self.max_random_draws {
            let candidate = self.format.render(self.rng.gen_range(low..=high));
            if !is_taken(candidate.as_str()) {
                return Some(candidate);
            }
            tracing::debug!(attempt, token = %candidate, "token collision, redrawing");
        }

        let space = self.format.space_size();
        let start = self.rng.gen_range(0..space);
        tracing::warn!(
            draws = self.max_random_draws,
            "random token draws exhausted, sweeping token space"
        );
        (0..space)
            .map(|offset| low + (start + offset) % space)
            .map(|numeral| self.format.render(numeral))
            .find(|candidate| !is_taken(candidate.as_str()))
    }
}
