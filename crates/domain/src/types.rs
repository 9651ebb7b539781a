//! Common data types used throughout the application

use chrono::{DateTime, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SlotifyError};

/// The user's requested action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Book,
    Check,
    Unknown,
}

impl Intent {
    /// Parse a textual intent label permissively; anything that is not
    /// "book" or "check" maps to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "book" => Self::Book,
            "check" => Self::Check,
            _ => Self::Unknown,
        }
    }
}

/// Which signal produced the candidate fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentSource {
    StructuredService,
    FallbackParser,
    None,
}

/// Candidate scheduling request produced once per request by the intent
/// extractor; consumed read-only by the resolver and decision engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentCandidate {
    pub intent: Intent,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    /// Whether the time carried a minute stated by the source (as opposed to
    /// a defaulted `:00`); controls whole-hour truncation in the resolver
    pub explicit_minute: bool,
    pub reason: String,
    pub source: IntentSource,
}

impl IntentCandidate {
    /// True when both calendar date and clock time are present.
    pub fn has_usable_fields(&self) -> bool {
        self.date.is_some() && self.time.is_some()
    }
}

/// A start/end instant pair defining a candidate or booked meeting slot.
///
/// Invariant: `end > start`, enforced at construction. Windows are immutable;
/// any adjustment produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl TimeWindow {
    /// Create a window, rejecting empty or negative spans.
    ///
    /// # Errors
    /// Returns `SlotifyError::InvalidInput` when `end <= start`.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self> {
        if end <= start {
            return Err(SlotifyError::InvalidInput(format!(
                "window end {} is not after start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Create a window of `duration` anchored at `start`.
    ///
    /// # Errors
    /// Returns `SlotifyError::InvalidInput` for non-positive durations.
    pub fn from_start(start: DateTime<Tz>, duration: Duration) -> Result<Self> {
        Self::new(start, start + duration)
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Point-in-time availability read from the calendar backend; never cached
/// or reused across requests.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilitySnapshot {
    pub window: TimeWindow,
    pub free: bool,
}

/// Terminal artifact of one request
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchedulingDecision {
    /// The event was created; `reference` is an opaque backend link used
    /// only for display
    Booked { window: TimeWindow, reference: String },
    /// The requested window is free (check intent)
    Available { window: TimeWindow },
    /// The requested window is taken; suggestions are populated for `book`
    /// requests only and may be empty
    Conflict { window: TimeWindow, suggestions: Vec<TimeWindow> },
    /// No time window could be resolved from the input
    Unresolvable { reason: String },
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Asia::Kolkata;

    use super::*;

    fn instant(h: u32) -> DateTime<Tz> {
        Kolkata.with_ymd_and_hms(2025, 7, 10, h, 0, 0).unwrap()
    }

    #[test]
    fn intent_label_parsing_is_permissive() {
        assert_eq!(Intent::from_label("Book"), Intent::Book);
        assert_eq!(Intent::from_label(" CHECK "), Intent::Check);
        assert_eq!(Intent::from_label("schedule"), Intent::Unknown);
        assert_eq!(Intent::from_label(""), Intent::Unknown);
    }

    #[test]
    fn window_rejects_inverted_span() {
        let result = TimeWindow::new(instant(15), instant(14));
        assert!(matches!(result, Err(SlotifyError::InvalidInput(_))));
    }

    #[test]
    fn window_rejects_zero_span() {
        let result = TimeWindow::new(instant(15), instant(15));
        assert!(result.is_err());
    }

    #[test]
    fn window_from_start_applies_duration() {
        let window = TimeWindow::from_start(instant(15), Duration::hours(1)).unwrap();
        assert_eq!(window.end(), instant(16));
        assert_eq!(window.duration(), Duration::hours(1));
    }
}
