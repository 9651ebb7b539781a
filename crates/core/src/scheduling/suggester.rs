//! Alternative-time suggestion
//!
//! Probes fixed forward offsets from a conflicting start to find free
//! substitute windows, bounded in count.

use chrono::Duration;
use slotify_domain::constants::{
    DEFAULT_DURATION_MINUTES, MAX_SUGGESTIONS, SUGGESTION_OFFSETS_MINUTES,
};
use slotify_domain::{Result, TimeWindow};
use tracing::debug;

use super::ports::CalendarPort;

/// Probe 30/60/90/120 minute offsets from the conflicting window's start,
/// each re-using the default one-hour duration, and collect up to three
/// free candidates in ascending-offset order. Probing stops early once the
/// bound is reached. An empty result is a valid outcome, not an error.
///
/// # Errors
/// Propagates backend failures from the availability reads.
pub async fn suggest_alternatives(
    calendar: &dyn CalendarPort,
    conflicting: &TimeWindow,
) -> Result<Vec<TimeWindow>> {
    let mut suggestions = Vec::new();

    for offset_minutes in SUGGESTION_OFFSETS_MINUTES {
        if suggestions.len() == MAX_SUGGESTIONS {
            break;
        }

        let start = conflicting.start() + Duration::minutes(offset_minutes);
        let candidate = TimeWindow::from_start(start, Duration::minutes(DEFAULT_DURATION_MINUTES))?;

        if calendar.check_availability(&candidate).await? {
            debug!(offset_minutes, start = %candidate.start(), "found free alternative");
            suggestions.push(candidate);
        }
    }

    Ok(suggestions)
}
