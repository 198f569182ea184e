//! Terminal output
//!
//! Text mode prints colored, human-oriented lines. JSON mode suppresses
//! them and prints one JSON document per result on stdout.

use crate::error::Result;
use colored::Colorize;
use serde::Serialize;

/// Output formatter shared by every command
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter {
    json: bool,
    no_color: bool,
}

impl OutputFormatter {
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json, no_color }
    }

    pub const fn is_json(&self) -> bool {
        self.json
    }

    pub const fn is_color(&self) -> bool {
        !self.no_color
    }

    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{} {}", "✅".green(), message.green());
        }
    }

    /// Errors always go to stderr, in both modes
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "❌".red(), message.red().bold());
    }

    pub fn warning(&self, message: &str) {
        if !self.json {
            println!("{} {}", "⚠️".yellow(), message.yellow());
        }
    }

    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    /// Section heading such as `--- PARKING RECEIPT ---`
    pub fn heading(&self, title: &str) {
        if !self.json {
            println!("\n{}", format!("--- {title} ---").bold());
        }
    }

    /// Serialize `value` as one line of JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string(value)?);
        Ok(())
    }
}
