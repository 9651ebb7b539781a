//! Application configuration structures
//!
//! Read-only after initialization; every request borrows the same `Config`.
//! Secrets (API keys, OAuth tokens) are deliberately not part of this
//! structure - adapters read them from the environment.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SlotifyError};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// IANA timezone name (e.g. "Asia/Kolkata"); all resolved instants are
    /// localized to this zone
    pub timezone: String,
    pub extraction: ExtractionConfig,
    pub calendar: CalendarConfig,
    /// Seed for the conversational-gate reply rotation; `None` seeds from
    /// entropy
    #[serde(default)]
    pub response_seed: Option<u64>,
}

/// Structured-extraction service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Model identifier passed to the text-understanding service
    pub model: String,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

/// Calendar backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Calendar identifier to read from and write to
    pub calendar_id: String,
}

fn default_max_output_tokens() -> u32 {
    512
}

impl Config {
    /// Parse the configured timezone name into a `chrono_tz::Tz`.
    ///
    /// # Errors
    /// Returns `SlotifyError::Config` when the name is not a valid IANA zone.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| SlotifyError::Config(format!("invalid timezone: {}", self.timezone)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: "Asia/Kolkata".to_string(),
            extraction: ExtractionConfig {
                model: "gemini-1.5-flash".to_string(),
                max_output_tokens: default_max_output_tokens(),
            },
            calendar: CalendarConfig { calendar_id: "primary".to_string() },
            response_seed: None,
        }
    }
}
